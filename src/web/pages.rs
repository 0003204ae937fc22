//! Signed-in shell pages: sidebar plus page title.

use axum::{
    extract::{Extension, OriginalUri},
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{
    html::{document, escape},
    sidebar::{self, SidebarUser},
    SIGN_IN_PATH,
};
use crate::api::handlers::auth::{session::extract_session_secret, AuthError, AuthState};

fn redirect_to_sign_in() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, HeaderValue::from_static(SIGN_IN_PATH));
    (StatusCode::SEE_OTHER, headers).into_response()
}

/// `GET /`, `/documents`, `/images`, `/media`, `/others`.
pub async fn shell(
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
) -> Response {
    let session = extract_session_secret(&headers);
    let user = match auth_state.current_user(session.as_ref()).await {
        Ok(Some(user)) => user,
        Ok(None) => return redirect_to_sign_in(),
        Err(AuthError::SessionRejected(err)) => {
            debug!("Session rejected: {err}");
            return redirect_to_sign_in();
        }
        Err(err) => {
            warn!("Treating current user lookup failure as signed out: {err}");
            return redirect_to_sign_in();
        }
    };

    let path = uri.path();
    let title = sidebar::nav_item(path).map_or("Dashboard", |item| item.name);
    let sidebar = sidebar::render(
        path,
        &SidebarUser {
            full_name: &user.full_name,
            avatar: &user.avatar,
            email: &user.email,
        },
    );

    let body = format!(
        r#"<div class="flex h-screen">
{sidebar}
<main class="main-content"><h1 class="h1 capitalize">{}</h1></main>
</div>"#,
        escape(title)
    );

    Html(document(title, &body)).into_response()
}
