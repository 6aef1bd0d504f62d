//! Role-based authorization.
//!
//! Two layers, both pure functions of the role: the navigation menu filter
//! ([`allowed_menu`]) and the page guard ([`guard_page`]) that every page
//! runs on entry regardless of how it was reached.

use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::models::Role;

const ALL_ROLES: &[Role] = &[Role::Admin, Role::Apoteker];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Login,
    Dashboard,
    Profile,
    Medicines,
    Diseases,
    ProtocolTherapy,
    BmiCalculator,
    UserManagement,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Login => "/login",
            Page::Dashboard => "/dashboard",
            Page::Profile => "/profile",
            Page::Medicines => "/medicines",
            Page::Diseases => "/diseases",
            Page::ProtocolTherapy => "/protocol-therapy",
            Page::BmiCalculator => "/bmi-calculator",
            Page::UserManagement => "/users",
        }
    }

    /// Resolve a route. The root path lands on the dashboard.
    pub fn from_path(path: &str) -> Option<Page> {
        let page = match path {
            "/" => Page::Dashboard,
            "/login" => Page::Login,
            "/dashboard" => Page::Dashboard,
            "/profile" => Page::Profile,
            "/medicines" => Page::Medicines,
            "/diseases" => Page::Diseases,
            "/protocol-therapy" => Page::ProtocolTherapy,
            "/bmi-calculator" => Page::BmiCalculator,
            "/users" => Page::UserManagement,
            _ => return None,
        };
        Some(page)
    }

    /// Roles allowed to open the page. The login page is public.
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Page::UserManagement => ADMIN_ONLY,
            _ => ALL_ROLES,
        }
    }
}

/// A sidebar navigation entry.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MenuEntry {
    pub page: Page,
    pub label: &'static str,
    pub roles: &'static [Role],
}

impl MenuEntry {
    pub fn path(&self) -> &'static str {
        self.page.path()
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// The full menu in display order.
pub const MENU: [MenuEntry; 7] = [
    MenuEntry {
        page: Page::Dashboard,
        label: "Dashboard",
        roles: ALL_ROLES,
    },
    MenuEntry {
        page: Page::Profile,
        label: "Profil",
        roles: ALL_ROLES,
    },
    MenuEntry {
        page: Page::Medicines,
        label: "Daftar Obat",
        roles: ALL_ROLES,
    },
    MenuEntry {
        page: Page::Diseases,
        label: "Daftar Penyakit",
        roles: ALL_ROLES,
    },
    MenuEntry {
        page: Page::ProtocolTherapy,
        label: "Protokol Terapi",
        roles: ALL_ROLES,
    },
    MenuEntry {
        page: Page::BmiCalculator,
        label: "Kalkulator BMI",
        roles: ALL_ROLES,
    },
    MenuEntry {
        page: Page::UserManagement,
        label: "Kelola Pengguna",
        roles: ADMIN_ONLY,
    },
];

/// Menu entries visible to a role, in menu order.
pub fn allowed_menu(role: Role) -> Vec<&'static MenuEntry> {
    MENU.iter().filter(|entry| entry.allows(role)).collect()
}

/// What a page should do on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAccess {
    Render,
    Redirect(Page),
}

/// Decide whether a page renders for the given session.
pub fn guard_page(session: Option<&Session>, page: Page) -> PageAccess {
    match (session, page) {
        (None, Page::Login) => PageAccess::Render,
        (None, _) => PageAccess::Redirect(Page::Login),
        (Some(_), Page::Login) => PageAccess::Redirect(Page::Dashboard),
        (Some(session), page) if page.allowed_roles().contains(&session.role()) => {
            PageAccess::Render
        }
        (Some(_), _) => PageAccess::Redirect(Page::Dashboard),
    }
}

/// CRUD affordances a role gets on each collection.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub manage_medicines: bool,
    pub manage_diseases: bool,
    pub manage_users: bool,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        let admin = role == Role::Admin;
        Self {
            manage_medicines: admin,
            manage_diseases: admin,
            manage_users: admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session(role: Role) -> Session {
        Session::new(User {
            id: "9".into(),
            username: "tester".into(),
            email: "tester@hospital.com".into(),
            full_name: "Tester".into(),
            role,
            created_at: "2024-01-01".into(),
            is_active: true,
        })
    }

    #[test]
    fn test_admin_sees_full_menu() {
        let menu = allowed_menu(Role::Admin);
        assert_eq!(menu.len(), MENU.len());
        assert_eq!(menu.last().unwrap().page, Page::UserManagement);
    }

    #[test]
    fn test_apoteker_menu_excludes_user_management() {
        let pages: Vec<_> = allowed_menu(Role::Apoteker).iter().map(|e| e.page).collect();
        assert_eq!(
            pages,
            vec![
                Page::Dashboard,
                Page::Profile,
                Page::Medicines,
                Page::Diseases,
                Page::ProtocolTherapy,
                Page::BmiCalculator,
            ]
        );
    }

    #[test]
    fn test_direct_navigation_to_users_redirects_apoteker() {
        let apoteker = session(Role::Apoteker);
        assert_eq!(
            guard_page(Some(&apoteker), Page::UserManagement),
            PageAccess::Redirect(Page::Dashboard)
        );

        let admin = session(Role::Admin);
        assert_eq!(guard_page(Some(&admin), Page::UserManagement), PageAccess::Render);
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        assert_eq!(guard_page(None, Page::Medicines), PageAccess::Redirect(Page::Login));
        assert_eq!(guard_page(None, Page::Login), PageAccess::Render);
    }

    #[test]
    fn test_signed_in_user_skips_login_page() {
        let admin = session(Role::Admin);
        assert_eq!(
            guard_page(Some(&admin), Page::Login),
            PageAccess::Redirect(Page::Dashboard)
        );
    }

    #[test]
    fn test_paths_round_trip() {
        for entry in MENU {
            assert_eq!(Page::from_path(entry.path()), Some(entry.page));
        }
        assert_eq!(Page::from_path("/"), Some(Page::Dashboard));
        assert_eq!(Page::from_path("/admin"), None);
    }

    #[test]
    fn test_capabilities() {
        let admin = Capabilities::for_role(Role::Admin);
        assert!(admin.manage_medicines && admin.manage_diseases && admin.manage_users);

        let apoteker = Capabilities::for_role(Role::Apoteker);
        assert!(!apoteker.manage_medicines);
        assert!(!apoteker.manage_diseases);
        assert!(!apoteker.manage_users);
    }
}
