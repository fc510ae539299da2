use tabled::Table;

use crate::{
    Res,
    cli::{auth::authorize, spinner},
    info,
    management::MixerState,
    types::ArtistTableRow,
};

pub async fn search_artists(state: MixerState, addr: &str, name: &str, limit: u32) -> Res<()> {
    authorize(&state, addr).await?;

    let pb = spinner(format!("Searching artists for '{}'...", name));
    let session = state.session_snapshot().await;
    let result = state.mixer.resolver().search(&session, name, limit).await;
    pb.finish_and_clear();

    let artists = result?;
    if artists.is_empty() {
        info!("No artists found for '{}'", name);
        return Ok(());
    }

    let rows: Vec<ArtistTableRow> = artists.iter().map(ArtistTableRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}
