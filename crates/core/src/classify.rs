//! Ordered classification of raw events into descriptive labels.
//!
//! Rules are evaluated top to bottom and the first match wins, so the order a
//! page lists them in is part of its meaning.

use crate::rows::EventRow;

/// One `(event, screen, view) -> label` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub event: &'static str,
    /// Required screen name, or any screen when `None`
    pub screen: Option<&'static str>,
    /// Required view id, or any view when `None`
    pub view: Option<&'static str>,
    pub label: &'static str,
}

impl Rule {
    pub const fn new(event: &'static str, screen: &'static str, label: &'static str) -> Self {
        Self {
            event,
            screen: Some(screen),
            view: None,
            label,
        }
    }

    pub const fn with_view(
        event: &'static str,
        screen: &'static str,
        view: &'static str,
        label: &'static str,
    ) -> Self {
        Self {
            event,
            screen: Some(screen),
            view: Some(view),
            label,
        }
    }

    fn matches(&self, event: &str, screen: Option<&str>, view: Option<&str>) -> bool {
        self.event == event
            && self.screen.map_or(true, |s| screen == Some(s))
            && self.view.map_or(true, |v| view == Some(v))
    }
}

/// What happens to an event that no rule matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// `"Other: {event} - {screen}"`, or the no-screen label when the row
    /// has no screen
    Other,
    /// The row gets no label
    Drop,
}

/// How a page turns a row into its category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classifier {
    /// The raw event name is the label.
    EventName,
    /// Ordered rule list with a no-event label and a fallback.
    Rules {
        rules: Vec<Rule>,
        no_event: Option<&'static str>,
        /// Label for unmatched events without a screen
        no_screen: Option<&'static str>,
        fallback: Fallback,
    },
}

impl Classifier {
    pub fn rules(rules: &[Rule]) -> Self {
        Self::Rules {
            rules: rules.to_vec(),
            no_event: None,
            no_screen: None,
            fallback: Fallback::Drop,
        }
    }

    pub fn with_no_event(mut self, label: &'static str) -> Self {
        if let Self::Rules { no_event, .. } = &mut self {
            *no_event = Some(label);
        }
        self
    }

    pub fn with_no_screen(mut self, label: &'static str) -> Self {
        if let Self::Rules { no_screen, .. } = &mut self {
            *no_screen = Some(label);
        }
        self
    }

    pub fn with_fallback(mut self, value: Fallback) -> Self {
        if let Self::Rules { fallback, .. } = &mut self {
            *fallback = value;
        }
        self
    }

    /// Label for raw attributes, or `None` when the row has no category.
    pub fn classify(
        &self,
        event: Option<&str>,
        screen: Option<&str>,
        view: Option<&str>,
    ) -> Option<String> {
        match self {
            Self::EventName => event.filter(|e| !e.is_empty()).map(str::to_string),
            Self::Rules {
                rules,
                no_event,
                no_screen,
                fallback,
            } => {
                let Some(event) = event else {
                    return no_event.map(str::to_string);
                };

                if let Some(rule) = rules.iter().find(|r| r.matches(event, screen, view)) {
                    return Some(rule.label.to_string());
                }

                match (fallback, screen) {
                    (Fallback::Other, Some(screen)) => Some(format!("Other: {} - {}", event, screen)),
                    (Fallback::Other, None) => no_screen.map(str::to_string),
                    (Fallback::Drop, _) => None,
                }
            }
        }
    }

    pub fn classify_row(&self, row: &EventRow) -> Option<String> {
        self.classify(
            row.event_name.as_deref(),
            row.screen_name.as_deref(),
            row.view_id.as_deref(),
        )
    }
}
