use axum::response::{Html, Redirect};

use crate::{
    api::pages, info, management::CredentialManager, session::Session, types::Provider,
};

pub async fn index(session: Session) -> Html<String> {
    let credentials = CredentialManager::new(session);
    let source = credentials.is_connected(Provider::Source).await;
    let destination = credentials.is_connected(Provider::Destination).await;

    Html(pages::index(source, destination))
}

/// Forgets both credentials of this session.
pub async fn logout(session: Session) -> Redirect {
    let credentials = CredentialManager::new(session);
    credentials.clear(Provider::Source).await;
    credentials.clear(Provider::Destination).await;
    info!("Session disconnected");

    Redirect::to("/")
}
