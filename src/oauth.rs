//! # OAuth2 Authorization-Code Flow
//!
//! Both providers are driven through the same authorization-code flow. Nothing
//! but the CSRF `state` string survives between the login redirect and the
//! callback: every step is a function over an explicit [`ProviderConfig`] and
//! the caller's [`Session`].
//!
//! ## Flow Implementation
//! 1. **State Generation**: [`start_login`] stores a fresh random state token in
//!    the session and builds the provider's authorization URL.
//! 2. **User Consent**: the browser is redirected to the provider.
//! 3. **Callback**: [`handle_callback`] consumes the stored state, verifies it
//!    against the returned one and rejects the request on any mismatch.
//! 4. **Token Exchange**: the authorization code is exchanged at the token
//!    endpoint using the client secret.
//! 5. **Credential Storage**: the resulting [`Credential`] is written to the
//!    session through the [`CredentialManager`].
//!
//! ## Security Considerations
//!
//! - The state token is single use; it is removed from the session before it
//!   is compared, so a replayed callback always fails.
//! - A callback without a pending state is rejected the same way as a
//!   mismatching one.

use reqwest::Client;
use url::Url;

use crate::{
    config::ProviderConfig,
    error::AuthError,
    management::CredentialManager,
    session::Session,
    types::{CallbackParams, Credential, Provider, TokenResponse},
    utils,
};

/// Builds the provider's authorization URL for the given state token.
///
/// # Arguments
///
/// * `config` - Client registration and endpoints of the provider
/// * `state` - CSRF state token to round-trip through the provider
///
/// # Returns
///
/// The authorization endpoint with `client_id`, `response_type=code`,
/// `redirect_uri`, the space separated `scope`, `state` and any
/// provider specific extra parameters, all properly percent-encoded.
///
/// # Example
///
/// ```
/// let url = authorization_url(&config.spotify, "abc")?;
/// assert!(url.as_str().starts_with("https://accounts.spotify.com/authorize?"));
/// ```
pub fn authorization_url(config: &ProviderConfig, state: &str) -> Result<Url, AuthError> {
    let mut url = Url::parse(&config.auth_url)?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("client_id", &config.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &config.redirect_uri)
            .append_pair("scope", &config.scopes.join(" "))
            .append_pair("state", state);
        for (key, value) in &config.extra_auth_params {
            query.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Starts a login: issues a state token for this session and returns the
/// URL the browser has to be redirected to.
///
/// A login already in progress for the same provider is superseded; only the
/// newest state token is accepted on callback.
pub async fn start_login(
    config: &ProviderConfig,
    provider: Provider,
    session: &Session,
) -> Result<Url, AuthError> {
    let state = utils::generate_state_token();
    let url = authorization_url(config, &state)?;

    session
        .insert(provider.state_key(), &state)
        .await
        .map_err(|e| AuthError::Session(e.to_string()))?;

    Ok(url)
}

/// Completes a login from the provider's redirect.
///
/// # Arguments
///
/// * `http` - Shared HTTP client used for the token exchange
/// * `config` - Client registration and endpoints of the provider
/// * `provider` - Which provider the callback belongs to
/// * `session` - Session that started the login
/// * `params` - Query parameters of the callback request
///
/// # Errors
///
/// - [`AuthError::CsrfMismatch`] - no pending state, no returned state, or the two differ
/// - [`AuthError::UserDenied`] - the provider reported an error or sent no code
/// - [`AuthError::ExchangeFailed`] - the token endpoint refused the code
/// - [`AuthError::Session`] - the credential could not be stored
///
/// No credential is stored unless every check passed.
pub async fn handle_callback(
    http: &Client,
    config: &ProviderConfig,
    provider: Provider,
    session: &Session,
    params: &CallbackParams,
) -> Result<Credential, AuthError> {
    let expected: Option<String> = session.take(provider.state_key()).await;
    verify_state(expected.as_deref(), params.state.as_deref())?;

    if let Some(error) = &params.error {
        return Err(AuthError::UserDenied(error.clone()));
    }
    let code = params
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or_else(|| {
            AuthError::UserDenied(format!("no code received from {}", provider))
        })?;

    let token = exchange_code(http, config, code).await?;
    let credential = into_credential(provider, config, token);

    CredentialManager::new(session.clone())
        .persist(&credential)
        .await
        .map_err(AuthError::Session)?;

    Ok(credential)
}

/// Compares the state issued for the session with the one the provider returned.
pub fn verify_state(expected: Option<&str>, returned: Option<&str>) -> Result<(), AuthError> {
    match (expected, returned) {
        (Some(expected), Some(returned)) if !expected.is_empty() && expected == returned => Ok(()),
        _ => Err(AuthError::CsrfMismatch),
    }
}

async fn exchange_code(
    http: &Client,
    config: &ProviderConfig,
    code: &str,
) -> Result<TokenResponse, AuthError> {
    let res = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config.redirect_uri),
            ("client_id", &config.client_id),
            ("client_secret", &config.client_secret),
        ])
        .send()
        .await
        .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(AuthError::ExchangeFailed(format!("{}: {}", status, body)));
    }

    res.json::<TokenResponse>()
        .await
        .map_err(|e| AuthError::ExchangeFailed(e.to_string()))
}

fn into_credential(provider: Provider, config: &ProviderConfig, token: TokenResponse) -> Credential {
    let scopes = match token.scope {
        Some(scope) => scope.split_whitespace().map(str::to_string).collect(),
        None => config.scopes.clone(),
    };

    Credential {
        provider,
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        token_uri: config.token_url.clone(),
        client_id: config.client_id.clone(),
        client_secret: config.client_secret.clone(),
        scopes,
        expires_at: token
            .expires_in
            .map(|expires_in| utils::now_timestamp().saturating_add(expires_in)),
    }
}
