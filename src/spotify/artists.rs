use super::{SpotifyClient, ensure_success};
use crate::{
    error::Result,
    types::{ArtistMatch, SearchArtistsResponse, TopTrack, TopTracksResponse},
};

/// Upper bound the search endpoint accepts for `limit`.
pub const MAX_SEARCH_LIMIT: u32 = 50;

impl SpotifyClient {
    /// Searches artists by free text and returns one page of candidates in the
    /// order Spotify ranks them.
    ///
    /// # Arguments
    ///
    /// * `token` - Access token of the authenticated user
    /// * `query` - Free-text artist name as the user typed it
    /// * `limit` - Page size, clamped to `1..=50`
    pub(crate) async fn search(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ArtistMatch>> {
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT).to_string();

        let response = self
            .http
            .get(self.api_url("search"))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "artist"), ("limit", limit.as_str())])
            .send()
            .await?;

        let res = ensure_success(response)
            .await?
            .json::<SearchArtistsResponse>()
            .await?;

        Ok(res
            .artists
            .items
            .into_iter()
            .map(ArtistMatch::from)
            .collect())
    }

    /// Top tracks of an artist for one market, in Spotify's popularity order.
    /// The endpoint is not paginated and returns at most ten tracks.
    pub(crate) async fn top_tracks(
        &self,
        token: &str,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<TopTrack>> {
        let response = self
            .http
            .get(self.api_url(&format!("artists/{}/top-tracks", artist_id)))
            .bearer_auth(token)
            .query(&[("market", market)])
            .send()
            .await?;

        let res = ensure_success(response)
            .await?
            .json::<TopTracksResponse>()
            .await?;

        Ok(res.tracks.into_iter().map(TopTrack::from).collect())
    }
}
