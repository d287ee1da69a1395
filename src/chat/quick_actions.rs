//! Quick-action shortcuts.
//!
//! Each entry is a canned, already-clean input that goes through the normal
//! `send` path; nothing about them is special-cased.

/// A label shown on a shortcut button and the text it sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub message: &'static str,
}

/// The shortcuts offered under the message log, in display order.
pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "MOQ",
        message: "What is the minimum order quantity?",
    },
    QuickAction {
        label: "Marketplace",
        message: "Show me the marketplace",
    },
    QuickAction {
        label: "Suppliers",
        message: "Show me the suppliers",
    },
    QuickAction {
        label: "Shipping",
        message: "What are the shipping options?",
    },
    QuickAction {
        label: "Help",
        message: "What can you help me with?",
    },
];

/// Look up a shortcut by label, ignoring ASCII case.
pub fn find_quick_action(label: &str) -> Option<&'static QuickAction> {
    let label = label.trim();
    QUICK_ACTIONS
        .iter()
        .find(|action| action.label.eq_ignore_ascii_case(label))
}
