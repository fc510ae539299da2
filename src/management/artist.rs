use crate::{
    error::{MixerError, Result},
    management::AuthSession,
    spotify::SharedApi,
    types::ArtistMatch,
};

/// Number of search candidates considered when resolving a name.
pub const RESOLVE_CANDIDATES: u32 = 10;

/// Picks the best candidate for `query`.
///
/// Candidates are scanned in the order the search API ranked them. The first
/// one whose name equals the query ignoring case and surrounding whitespace
/// wins; without such a candidate the top-ranked one is taken. Returns `None`
/// only for an empty list.
pub fn best_match(query: &str, candidates: Vec<ArtistMatch>) -> Option<ArtistMatch> {
    let wanted = query.trim().to_lowercase();

    let exact = candidates
        .iter()
        .position(|c| c.name.trim().to_lowercase() == wanted);

    let index = exact.unwrap_or(0);
    candidates.into_iter().nth(index)
}

pub struct ArtistResolver {
    api: SharedApi,
    candidates: u32,
}

impl ArtistResolver {
    pub fn new(api: SharedApi) -> Self {
        Self {
            api,
            candidates: RESOLVE_CANDIDATES,
        }
    }

    /// Raw candidate list for `query`, gated on the session.
    pub async fn search(
        &self,
        session: &AuthSession,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ArtistMatch>> {
        let token = session.access_token()?;
        let query = query.trim();
        if query.is_empty() {
            return Err(MixerError::InvalidRequest(
                "artist name must not be empty".to_string(),
            ));
        }
        self.api.search_artists(token, query, limit).await
    }

    pub async fn resolve(&self, session: &AuthSession, name: &str) -> Result<ArtistMatch> {
        let token = session.access_token()?;
        self.resolve_with_token(token, name).await
    }

    /// Resolution for callers that already passed the gate.
    pub(crate) async fn resolve_with_token(&self, token: &str, name: &str) -> Result<ArtistMatch> {
        let query = name.trim();
        if query.is_empty() {
            return Err(MixerError::NotFound(name.to_string()));
        }

        let candidates = self
            .api
            .search_artists(token, query, self.candidates)
            .await?;

        best_match(query, candidates).ok_or_else(|| MixerError::NotFound(name.to_string()))
    }
}
