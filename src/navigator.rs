//! Host-side navigation driven by assistant replies.
//!
//! The controller hands the reply's `action` to a [`Navigator`] verbatim.
//! Identifiers are opaque to the controller; deciding what they mean, and
//! ignoring the ones that mean nothing, is the navigator's job.

use std::fmt;
use std::str::FromStr;

/// Receives navigation commands from the conversation controller.
///
/// Implementations must not panic on unknown identifiers.
pub trait Navigator {
    fn navigate(&mut self, page: &str);
}

impl<F> Navigator for F
where
    F: FnMut(&str),
{
    fn navigate(&mut self, page: &str) {
        self(page)
    }
}

/// Pages of the supplier hub that the assistant may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HubPage {
    #[default]
    Marketplace,
    Suppliers,
    Rfq,
    Login,
}

impl HubPage {
    pub const ALL: [HubPage; 4] = [
        HubPage::Marketplace,
        HubPage::Suppliers,
        HubPage::Rfq,
        HubPage::Login,
    ];

    /// Identifier used on the wire.
    pub fn id(self) -> &'static str {
        match self {
            HubPage::Marketplace => "marketplace",
            HubPage::Suppliers => "suppliers",
            HubPage::Rfq => "rfq",
            HubPage::Login => "login",
        }
    }

    /// Human-readable page title.
    pub fn title(self) -> &'static str {
        match self {
            HubPage::Marketplace => "Marketplace",
            HubPage::Suppliers => "Suppliers",
            HubPage::Rfq => "Bulk Request for Quote",
            HubPage::Login => "Sign In",
        }
    }
}

impl fmt::Display for HubPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HubPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HubPage::ALL
            .into_iter()
            .find(|page| page.id() == s)
            .ok_or_else(|| format!("unknown page '{s}'"))
    }
}

/// Navigator that tracks which hub page is active.
#[derive(Debug, Clone, Default)]
pub struct PageNavigator {
    active: HubPage,
    /// Number of successful page switches.
    switches: usize,
}

impl PageNavigator {
    pub fn new(initial: HubPage) -> Self {
        Self {
            active: initial,
            switches: 0,
        }
    }

    pub fn active(&self) -> HubPage {
        self.active
    }

    pub fn switches(&self) -> usize {
        self.switches
    }

    /// Switch to a page. Switching to the active page still counts.
    pub fn switch_to(&mut self, page: HubPage) {
        self.active = page;
        self.switches += 1;
        log::debug!("Switched to page {}", page);
    }
}

impl Navigator for PageNavigator {
    fn navigate(&mut self, page: &str) {
        match page.parse::<HubPage>() {
            Ok(page) => self.switch_to(page),
            Err(e) => {
                log::debug!("Ignoring navigation request: {}", e);
                crate::debug_log!("NAV", "Ignored unknown page identifier {:?}", page);
            }
        }
    }
}
