use tabled::Table;

use crate::{
    Res,
    cli::{auth::authorize, spinner},
    management::MixerState,
    success,
    types::{MixRequest, TrackTableRow},
    warning,
};

pub async fn mix(state: MixerState, addr: &str, request: MixRequest) -> Res<()> {
    request.validate()?;
    authorize(&state, addr).await?;

    let pb = spinner(format!(
        "Mixing {} artists into '{}'...",
        request.artist_names.len(),
        request.playlist_name
    ));
    let session = state.session_snapshot().await;
    let result = state.mixer.mix(&session, &request).await;
    pb.finish_and_clear();

    let result = result?;

    let rows: Vec<TrackTableRow> = result
        .tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            artist: t.artist_name.clone(),
            track: t.name.clone(),
            searched: t.searched_for_name.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));

    if !result.skipped_artists.is_empty() {
        warning!("Skipped: {}", result.skipped_artists.join(", "));
    }
    success!(
        "Playlist '{}' with {} tracks: {}",
        request.playlist_name,
        result.tracks.len(),
        result.playlist_url
    );
    Ok(())
}
