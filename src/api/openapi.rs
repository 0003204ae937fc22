use super::handlers::{
    auth::{account, otp, session},
    health,
};
use utoipa::openapi::{Contact, InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// JSON endpoints are registered here via `.routes(routes!(...))`; the HTML
/// pages are merged in `api::app` and stay out of the document.
pub(crate) fn api_router() -> OpenApiRouter {
    OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(otp::send_otp))
        .routes(routes!(account::sign_up))
        .routes(routes!(account::sign_in))
        .routes(routes!(otp::verify))
        .routes(routes!(session::me))
        .routes(routes!(session::sign_out))
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact();
    info.license = cargo_license();

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Liveness and build information".to_string());

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("Email one-time codes and provider sessions".to_string());

    OpenApiBuilder::new()
        .info(info)
        .tags(Some(vec![health_tag, auth_tag]))
        .build()
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let authors = env!("CARGO_PKG_AUTHORS");
    let primary = authors.split(';').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    Some(value.trim()).filter(|trimmed| !trimmed.is_empty())
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    match author.split_once('<') {
        Some((name, email)) => {
            let name = name.trim();
            let email = email.trim_end_matches('>').trim();
            (
                Some(name).filter(|n| !n.is_empty()),
                Some(email).filter(|e| !e.is_empty()),
            )
        }
        None => {
            let name = author.trim();
            (Some(name).filter(|n| !n.is_empty()), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let api_doc = openapi();
        assert_eq!(api_doc.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(api_doc.info.version, env!("CARGO_PKG_VERSION"));

        let contact = api_doc.info.contact;
        assert!(contact.is_some());
        if let Some(contact) = contact {
            assert_eq!(contact.name.as_deref(), Some("Team Stashbox"));
            assert_eq!(contact.email.as_deref(), Some("team@stashbox.dev"));
        }

        let license = api_doc.info.license;
        assert!(license.is_some());
        if let Some(license) = license {
            assert_eq!(license.name, "BSD-3-Clause");
        }
    }

    #[test]
    fn openapi_documents_json_routes_only() {
        let api_doc = openapi();
        let tags = api_doc.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "auth"));
        assert!(tags.iter().any(|tag| tag.name == "health"));
        for path in [
            "/health",
            "/v1/auth/otp",
            "/v1/auth/sign-up",
            "/v1/auth/sign-in",
            "/v1/auth/verify",
            "/v1/auth/me",
            "/v1/auth/sign-out",
        ] {
            assert!(api_doc.paths.paths.contains_key(path), "missing {path}");
        }
        assert!(!api_doc.paths.paths.contains_key("/sign-in"));
    }

    #[test]
    fn parse_author_variants() {
        assert_eq!(
            parse_author("Ann <ann@example.com>"),
            (Some("Ann"), Some("ann@example.com"))
        );
        assert_eq!(parse_author("Ann"), (Some("Ann"), None));
        assert_eq!(parse_author("<ann@example.com>"), (None, Some("ann@example.com")));
    }
}
