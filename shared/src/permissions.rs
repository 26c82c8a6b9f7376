//! Role → visible screens. Navigation consults this table once per render
//! instead of comparing role ids inline.

use serde::{Deserialize, Serialize};

use crate::Role;

/// Top-level screens reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Home,
    ManageServices,
    Dashboard,
    ManageUsers,
    SendMail,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::ManageServices,
        Section::Dashboard,
        Section::ManageUsers,
        Section::SendMail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::ManageServices => "Manage Services",
            Section::Dashboard => "Admin Dashboard",
            Section::ManageUsers => "Manage Users",
            Section::SendMail => "Send Mail",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Section::Home => "/home",
            Section::ManageServices => "/admin",
            Section::Dashboard => "/dashboard",
            Section::ManageUsers => "/manageusers",
            Section::SendMail => "/sendmail",
        }
    }

    pub fn from_path(path: &str) -> Option<Section> {
        let path = path.trim_end_matches('/');
        Section::ALL.into_iter().find(|s| s.path() == path)
    }
}

/// Tabs inside the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashboardTab {
    FindDevotee,
    Transactions,
    EditTransactions,
    WebsiteMediaUpdate,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] = [
        DashboardTab::FindDevotee,
        DashboardTab::Transactions,
        DashboardTab::EditTransactions,
        DashboardTab::WebsiteMediaUpdate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::FindDevotee => "Find Devotee",
            DashboardTab::Transactions => "Transactions",
            DashboardTab::EditTransactions => "Edit Transactions",
            DashboardTab::WebsiteMediaUpdate => "Website Media Update",
        }
    }
}

const ADMINS: &[Role] = &[Role::SuperAdmin, Role::ReceptionistAdmin];
const SUPER_ONLY: &[Role] = &[Role::SuperAdmin];
const EVERYONE: &[Role] = &Role::ALL;

const SECTION_RULES: &[(Section, &[Role])] = &[
    (Section::Home, EVERYONE),
    (Section::ManageServices, ADMINS),
    (Section::Dashboard, ADMINS),
    (Section::ManageUsers, SUPER_ONLY),
    (Section::SendMail, ADMINS),
];

const TAB_RULES: &[(DashboardTab, &[Role])] = &[
    (DashboardTab::FindDevotee, ADMINS),
    (DashboardTab::Transactions, ADMINS),
    (DashboardTab::EditTransactions, SUPER_ONLY),
    (DashboardTab::WebsiteMediaUpdate, SUPER_ONLY),
];

pub fn can_view(role: Role, section: Section) -> bool {
    SECTION_RULES
        .iter()
        .any(|(s, roles)| *s == section && roles.contains(&role))
}

pub fn can_open_tab(role: Role, tab: DashboardTab) -> bool {
    TAB_RULES
        .iter()
        .any(|(t, roles)| *t == tab && roles.contains(&role))
}

/// Sections in navigation order.
pub fn visible_sections(role: Role) -> Vec<Section> {
    SECTION_RULES
        .iter()
        .filter(|(_, roles)| roles.contains(&role))
        .map(|(section, _)| *section)
        .collect()
}

pub fn visible_tabs(role: Role) -> Vec<DashboardTab> {
    TAB_RULES
        .iter()
        .filter(|(_, roles)| roles.contains(&role))
        .map(|(tab, _)| *tab)
        .collect()
}

/// Where a freshly signed-in user lands.
pub fn landing_section(role: Role) -> Section {
    if can_view(role, Section::ManageServices) {
        Section::ManageServices
    } else {
        Section::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_sees_everything() {
        assert_eq!(visible_sections(Role::SuperAdmin), Section::ALL.to_vec());
        assert_eq!(visible_tabs(Role::SuperAdmin), DashboardTab::ALL.to_vec());
    }

    #[test]
    fn test_receptionist_visibility() {
        let sections = visible_sections(Role::ReceptionistAdmin);
        assert!(sections.contains(&Section::ManageServices));
        assert!(sections.contains(&Section::SendMail));
        assert!(!sections.contains(&Section::ManageUsers));
        assert_eq!(
            visible_tabs(Role::ReceptionistAdmin),
            vec![DashboardTab::FindDevotee, DashboardTab::Transactions]
        );
    }

    #[test]
    fn test_volunteer_and_guest_see_home_only() {
        for role in [Role::Volunteer, Role::Guest] {
            assert_eq!(visible_sections(role), vec![Section::Home]);
            assert!(visible_tabs(role).is_empty());
            assert_eq!(landing_section(role), Section::Home);
        }
    }

    #[test]
    fn test_every_section_grants_super_admin() {
        for section in Section::ALL {
            assert!(can_view(Role::SuperAdmin, section), "{section:?}");
        }
        for tab in DashboardTab::ALL {
            assert!(can_open_tab(Role::SuperAdmin, tab), "{tab:?}");
        }
    }

    #[test]
    fn test_paths_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_path(section.path()), Some(section));
        }
        assert_eq!(Section::from_path("/admin/"), Some(Section::ManageServices));
        assert_eq!(Section::from_path("/priest"), None);
    }
}
