//! Per-role presentation records.
//!
//! Each role maps to one static [`RoleView`]; callers branch on its fields
//! instead of on the role itself.

use catalog::{PartyKind, Role};
use pipeline::TabScope;

/// Dashboard variant a role lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dashboard {
    Admin,
    Brand,
    Talent,
}

/// What one role is offered across the directory and events pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleView {
    pub role: Role,
    /// Directory tabs, default first
    pub directory_tabs: &'static [PartyKind],
    /// Event tabs, default first
    pub event_tabs: &'static [TabScope],
    pub dashboard: Option<Dashboard>,
    /// May manage (edit, feature) any record
    pub can_manage: bool,
    pub directory_heading: &'static str,
    pub events_heading: &'static str,
}

const ADMIN: RoleView = RoleView {
    role: Role::Admin,
    directory_tabs: &[PartyKind::Talent, PartyKind::Brand],
    event_tabs: &[TabScope::Upcoming, TabScope::Past],
    dashboard: Some(Dashboard::Admin),
    can_manage: true,
    directory_heading: "Manage brands and talent in the platform.",
    events_heading: "Manage and oversee all platform events",
};

const BRAND: RoleView = RoleView {
    role: Role::Brand,
    directory_tabs: &[PartyKind::Talent],
    event_tabs: &[TabScope::Upcoming, TabScope::Past, TabScope::Mine],
    dashboard: Some(Dashboard::Brand),
    can_manage: false,
    directory_heading: "Discover and connect with talent.",
    events_heading: "Discover talent-hosted events and opportunities",
};

const TALENT: RoleView = RoleView {
    role: Role::Talent,
    directory_tabs: &[PartyKind::Talent],
    event_tabs: &[TabScope::Upcoming, TabScope::Past, TabScope::Mine],
    dashboard: Some(Dashboard::Talent),
    can_manage: false,
    directory_heading: "Discover and connect with talent.",
    events_heading: "Explore brand events and partnership opportunities",
};

const PUBLIC: RoleView = RoleView {
    role: Role::Public,
    directory_tabs: &[PartyKind::Talent],
    event_tabs: &[TabScope::Upcoming, TabScope::Past],
    dashboard: None,
    can_manage: false,
    directory_heading: "Discover and connect with talent.",
    events_heading: "Explore brand events and partnership opportunities",
};

impl RoleView {
    pub fn for_role(role: Role) -> &'static RoleView {
        match role {
            Role::Admin => &ADMIN,
            Role::Brand => &BRAND,
            Role::Talent => &TALENT,
            Role::Public => &PUBLIC,
        }
    }

    pub fn offers_directory(&self, kind: PartyKind) -> bool {
        self.directory_tabs.contains(&kind)
    }

    pub fn offers_event_tab(&self, scope: TabScope) -> bool {
        self.event_tabs.contains(&scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_a_record() {
        for role in Role::ALL {
            let view = RoleView::for_role(role);
            assert_eq!(view.role, role);
            assert!(!view.directory_tabs.is_empty());
            assert_eq!(view.event_tabs[0], TabScope::Upcoming);
        }
    }

    #[test]
    fn test_only_admin_manages_and_sees_brand_directory() {
        for role in Role::ALL {
            let view = RoleView::for_role(role);
            assert_eq!(view.can_manage, role == Role::Admin);
            assert_eq!(view.offers_directory(PartyKind::Brand), role == Role::Admin);
            assert!(view.offers_directory(PartyKind::Talent));
        }
    }

    #[test]
    fn test_my_events_tab_for_parties_only() {
        assert!(RoleView::for_role(Role::Brand).offers_event_tab(TabScope::Mine));
        assert!(RoleView::for_role(Role::Talent).offers_event_tab(TabScope::Mine));
        assert!(!RoleView::for_role(Role::Admin).offers_event_tab(TabScope::Mine));
        assert!(!RoleView::for_role(Role::Public).offers_event_tab(TabScope::Mine));
    }

    #[test]
    fn test_dashboards() {
        assert_eq!(RoleView::for_role(Role::Admin).dashboard, Some(Dashboard::Admin));
        assert_eq!(RoleView::for_role(Role::Public).dashboard, None);
    }
}
