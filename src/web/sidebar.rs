//! Side navigation for signed-in users.

use super::{html::escape, SIGN_OUT_PATH};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub url: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        name: "Dashboard",
        url: "/",
        icon: "/assets/icons/dashboard.svg",
    },
    NavItem {
        name: "Documents",
        url: "/documents",
        icon: "/assets/icons/documents.svg",
    },
    NavItem {
        name: "Images",
        url: "/images",
        icon: "/assets/icons/images.svg",
    },
    NavItem {
        name: "Media",
        url: "/media",
        icon: "/assets/icons/video.svg",
    },
    NavItem {
        name: "Others",
        url: "/others",
        icon: "/assets/icons/others.svg",
    },
];

/// The three user fields the sidebar shows.
#[derive(Debug, Clone, Copy)]
pub struct SidebarUser<'a> {
    pub full_name: &'a str,
    pub avatar: &'a str,
    pub email: &'a str,
}

#[must_use]
pub fn nav_item(path: &str) -> Option<&'static NavItem> {
    NAV_ITEMS.iter().find(|item| item.url == path)
}

#[must_use]
pub fn render(current_path: &str, user: &SidebarUser<'_>) -> String {
    let mut items = String::new();
    for item in &NAV_ITEMS {
        // exact match only
        let active = item.url == current_path;
        let _ = write!(
            items,
            r#"<a href="{url}" class="lg:w-full"{current}><li class="sidebar-nav-item{item_class}"><img src="{icon}" alt="{name}" width="24" height="24" class="nav-icon{icon_class}"><p class="hidden lg:block">{name}</p></li></a>"#,
            url = item.url,
            name = item.name,
            icon = item.icon,
            current = if active { r#" aria-current="page""# } else { "" },
            item_class = if active { " shad-active" } else { "" },
            icon_class = if active { " nav-icon-active" } else { "" },
        );
    }

    format!(
        r#"<aside class="sidebar">
<a href="/"><img src="/favicon.ico" alt="logo" width="52" height="52" class="rounded-full"></a>
<nav class="sidebar-nav"><ul class="flex flex-1 flex-col gap-6">{items}</ul></nav>
<div class="sidebar-user-info">
<img src="{avatar}" alt="Avatar" width="44" height="44" class="sidebar-user-avatar">
<div class="hidden lg:block">
<p class="subtitle-2 capitalize">{full_name}</p>
<p class="caption">{email}</p>
</div>
</div>
<form method="post" action="{SIGN_OUT_PATH}"><button type="submit" class="sign-out-button">Sign Out</button></form>
</aside>"#,
        avatar = escape(user.avatar),
        full_name = escape(user.full_name),
        email = escape(user.email),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: SidebarUser<'static> = SidebarUser {
        full_name: "Ann Lee",
        avatar: "https://img/a.png",
        email: "ann@example.com",
    };

    #[test]
    fn highlights_only_current_route() {
        let html = render("/images", &USER);
        assert_eq!(html.matches("shad-active").count(), 1);
        assert!(html.contains(
            r#"<a href="/images" class="lg:w-full" aria-current="page"><li class="sidebar-nav-item shad-active">"#
        ));
    }

    #[test]
    fn dashboard_is_not_a_prefix_match() {
        let html = render("/documents", &USER);
        assert!(html.contains(r#"<a href="/" class="lg:w-full"><li class="sidebar-nav-item">"#));
    }

    #[test]
    fn renders_user_fields_and_sign_out() {
        let html = render("/", &USER);
        assert!(html.contains("Ann Lee"));
        assert!(html.contains("ann@example.com"));
        assert!(html.contains(r#"src="https://img/a.png""#));
        assert!(html.contains(r#"action="/sign-out""#));
        for item in &NAV_ITEMS {
            assert!(html.contains(item.name));
        }
    }

    #[test]
    fn nav_item_lookup() {
        assert_eq!(nav_item("/media").map(|item| item.name), Some("Media"));
        assert!(nav_item("/nope").is_none());
    }
}
