use crate::{
    components::{hero_section, page_transition},
    error::{PortalError, PortalResult},
    state::PortalState,
};
use axum::{extract::State, http::Uri};
use maud::Markup;

pub async fn get_index_route(State(state): State<PortalState>) -> Markup {
    state.render(page_transition("", hero_section()))
}

pub async fn not_found(uri: Uri) -> PortalResult<Markup> {
    Err(PortalError::UnknownRoute {
        path: uri.path().to_string(),
    })
}
