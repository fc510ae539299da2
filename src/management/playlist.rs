use crate::{
    error::{MixerError, Result},
    info,
    management::{ArtistResolver, AuthSession},
    spotify::SharedApi,
    success,
    types::{ArtistMatch, MixRequest, MixResult, TopTrack, Track},
    utils, warning,
};

/// What mixing produced for one requested name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistOutcome {
    Resolved {
        query: String,
        artist: ArtistMatch,
        tracks: Vec<Track>,
    },
    Skipped {
        query: String,
        reason: MixerError,
    },
}

/// First `count` top tracks of `artist`, tagged with the query that found it.
pub fn take_tracks(
    artist: &ArtistMatch,
    query: &str,
    top_tracks: Vec<TopTrack>,
    count: usize,
) -> Vec<Track> {
    top_tracks
        .into_iter()
        .take(count)
        .map(|t| Track {
            uri: t.uri,
            name: t.name,
            artist_name: artist.name.clone(),
            searched_for_name: query.to_string(),
        })
        .collect()
}

pub struct PlaylistMixer {
    api: SharedApi,
    resolver: ArtistResolver,
    market: String,
}

impl PlaylistMixer {
    pub fn new(api: SharedApi, market: impl Into<String>) -> Self {
        Self {
            resolver: ArtistResolver::new(api.clone()),
            api,
            market: market.into(),
        }
    }

    pub fn resolver(&self) -> &ArtistResolver {
        &self.resolver
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    /// Resolves one artist and returns its first `limit` top tracks.
    pub async fn top_tracks(
        &self,
        session: &AuthSession,
        artist_name: &str,
        limit: usize,
    ) -> Result<(ArtistMatch, Vec<Track>)> {
        let token = session.access_token()?;
        let artist = self.resolver.resolve_with_token(token, artist_name).await?;
        let top = self
            .api
            .artist_top_tracks(token, &artist.id, &self.market)
            .await?;
        let tracks = take_tracks(&artist, artist_name, top, limit);
        Ok((artist, tracks))
    }

    /// Builds a new private playlist from the top tracks of every artist in
    /// `request`, in request order.
    ///
    /// Artists that cannot be resolved, or whose lookups fail remotely, are
    /// skipped with a warning. When no artist contributes a track the call
    /// fails with [`MixerError::NoTracksFound`] before anything is created.
    /// Failures while creating the playlist or adding tracks abort the request.
    /// Each call creates a new playlist, even for identical requests.
    pub async fn mix(&self, session: &AuthSession, request: &MixRequest) -> Result<MixResult> {
        let token = session.access_token()?;
        let count = request.songs_per_artist as usize;

        let mut outcomes = Vec::with_capacity(request.artist_names.len());
        for name in &request.artist_names {
            outcomes.push(self.collect_artist(token, name, count).await?);
        }

        let mut tracks = Vec::new();
        let mut found_artists = Vec::new();
        let mut skipped_artists = Vec::new();
        for outcome in outcomes {
            match outcome {
                ArtistOutcome::Resolved {
                    artist,
                    tracks: artist_tracks,
                    ..
                } => {
                    found_artists.push(artist.name);
                    tracks.extend(artist_tracks);
                }
                ArtistOutcome::Skipped { query, .. } => skipped_artists.push(query),
            }
        }

        if tracks.is_empty() {
            return Err(MixerError::NoTracksFound);
        }

        let description = utils::playlist_description(&found_artists, &request.artist_names);
        let playlist = self
            .api
            .create_playlist(token, &request.playlist_name, &description, false)
            .await?;
        success!(
            "Created playlist '{}' ({})",
            request.playlist_name,
            playlist.id
        );

        let uris: Vec<String> = tracks.iter().map(|t| t.uri.clone()).collect();
        self.api.add_tracks(token, &playlist.id, &uris).await?;
        success!("Added {} tracks to '{}'", uris.len(), request.playlist_name);

        Ok(MixResult {
            playlist_url: playlist.url,
            playlist_id: playlist.id,
            tracks,
            requested_artists: request.artist_names.clone(),
            found_artists,
            skipped_artists,
        })
    }

    /// Only `NotFound` and `Remote` turn into a skip; anything else aborts the mix.
    async fn collect_artist(
        &self,
        token: &str,
        query: &str,
        count: usize,
    ) -> Result<ArtistOutcome> {
        let artist = match self.resolver.resolve_with_token(token, query).await {
            Ok(artist) => artist,
            Err(reason) => return skip(query, reason),
        };
        info!("Resolved '{}' to {} ({})", query, artist.name, artist.id);

        match self
            .api
            .artist_top_tracks(token, &artist.id, &self.market)
            .await
        {
            Ok(top) => Ok(ArtistOutcome::Resolved {
                query: query.to_string(),
                tracks: take_tracks(&artist, query, top, count),
                artist,
            }),
            Err(reason) => skip(query, reason),
        }
    }
}

fn skip(query: &str, reason: MixerError) -> Result<ArtistOutcome> {
    if !reason.is_recoverable_per_artist() {
        return Err(reason);
    }
    warning!("Skipping '{}': {}", query, reason);
    Ok(ArtistOutcome::Skipped {
        query: query.to_string(),
        reason,
    })
}
