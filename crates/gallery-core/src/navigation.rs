//! Page-transition state machine.
//!
//! ```text
//! Idle -> HidingCurrent -> Fetching -> Mounting -> ShowingNext -> Idle
//!                              \-> Idle (fetch failed / malformed)
//! ```
//!
//! The machine itself performs no I/O. The app feeds it the completion of
//! each asynchronous step and acts on what it returns.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionState {
    #[default]
    Idle,
    HidingCurrent,
    Fetching,
    Mounting,
    ShowingNext,
}

impl fmt::Display for TransitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransitionState::Idle => "Idle",
            TransitionState::HidingCurrent => "HidingCurrent",
            TransitionState::Fetching => "Fetching",
            TransitionState::Mounting => "Mounting",
            TransitionState::ShowingNext => "ShowingNext",
        })
    }
}

/// Where a navigation came from. History navigations have already moved the
/// URL bar and must not push a new entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOrigin {
    Link,
    History,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: String,
    pub origin: RequestOrigin,
}

impl NavigationRequest {
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            origin: RequestOrigin::Link,
        }
    }

    pub fn history(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            origin: RequestOrigin::History,
        }
    }

    #[inline]
    pub fn pushes_history(&self) -> bool {
        self.origin == RequestOrigin::Link
    }
}

/// True when `href` points at a page on `origin` (`scheme://host[:port]`).
/// The origin must end exactly where the path, query or fragment begins, so
/// a host that merely starts with the same text does not match.
pub fn is_same_origin(href: &str, origin: &str) -> bool {
    if origin.is_empty() {
        return false;
    }
    href.strip_prefix(origin)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
}

/// What to do with a request that arrives while a transition is running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BusyPolicy {
    /// Drop link requests; keep the latest history request and replay it
    /// once the machine is idle again.
    #[default]
    DropLinks,
    /// Drop everything.
    DropAll,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationConfig {
    pub busy_policy: BusyPolicy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Started,
    Dropped,
    Queued,
}

/// Identifies one in-flight fetch. Results carrying any other ticket are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub url: String,
}

pub struct Navigator {
    state: TransitionState,
    config: NavigationConfig,
    active: Option<NavigationRequest>,
    queued: Option<NavigationRequest>,
    ticket: Option<FetchTicket>,
    next_ticket: u64,
}

impl Navigator {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            state: TransitionState::Idle,
            config,
            active: None,
            queued: None,
            ticket: None,
            next_ticket: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> TransitionState {
        self.state
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == TransitionState::Idle
    }

    /// The request currently being carried out.
    pub fn active(&self) -> Option<&NavigationRequest> {
        self.active.as_ref()
    }

    pub fn queued(&self) -> Option<&NavigationRequest> {
        self.queued.as_ref()
    }

    fn go(&mut self, to: TransitionState) {
        log::info!("[nav] {} -> {}", self.state, to);
        self.state = to;
    }

    /// Admit a request. Only `Started` means the caller should begin hiding
    /// the current page.
    pub fn begin(&mut self, request: NavigationRequest) -> Admission {
        if self.is_idle() {
            log::info!("[nav] navigate to {}", request.url);
            self.active = Some(request);
            self.go(TransitionState::HidingCurrent);
            return Admission::Started;
        }
        match (self.config.busy_policy, request.origin) {
            (BusyPolicy::DropLinks, RequestOrigin::History) => {
                log::info!("[nav] busy ({}), queued {}", self.state, request.url);
                self.queued = Some(request);
                Admission::Queued
            }
            _ => {
                log::warn!("[nav] busy ({}), dropped {}", self.state, request.url);
                Admission::Dropped
            }
        }
    }

    /// The outgoing page finished hiding. Returns the fetch to issue.
    pub fn hidden(&mut self) -> Option<FetchRequest> {
        if self.state != TransitionState::HidingCurrent {
            return None;
        }
        let url = self.active.as_ref()?.url.clone();
        let ticket = FetchTicket(self.next_ticket);
        self.next_ticket += 1;
        self.ticket = Some(ticket);
        self.go(TransitionState::Fetching);
        Some(FetchRequest { ticket, url })
    }

    /// Whether `ticket` belongs to the fetch in flight.
    #[inline]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.state == TransitionState::Fetching && self.ticket == Some(ticket)
    }

    /// A fetch succeeded. Returns the request to mount, or `None` if the
    /// ticket is stale.
    pub fn fetched(&mut self, ticket: FetchTicket) -> Option<NavigationRequest> {
        if !self.is_current(ticket) {
            log::warn!("[nav] ignoring stale fetch {}", ticket.0);
            return None;
        }
        self.ticket = None;
        self.go(TransitionState::Mounting);
        self.active.clone()
    }

    /// A fetch failed or returned unusable markup. Returns false if the
    /// ticket is stale.
    pub fn failed(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(ticket) {
            log::warn!("[nav] ignoring stale fetch {}", ticket.0);
            return false;
        }
        self.ticket = None;
        self.active = None;
        self.go(TransitionState::Idle);
        true
    }

    pub fn mounted(&mut self) {
        if self.state == TransitionState::Mounting {
            self.go(TransitionState::ShowingNext);
        }
    }

    /// The incoming page finished showing. Returns a queued request to
    /// replay, if one arrived during the transition.
    pub fn shown(&mut self) -> Option<NavigationRequest> {
        if self.state != TransitionState::ShowingNext {
            return None;
        }
        self.active = None;
        self.go(TransitionState::Idle);
        self.take_queued()
    }

    /// Pending replay once idle.
    pub fn take_queued(&mut self) -> Option<NavigationRequest> {
        if self.is_idle() {
            self.queued.take()
        } else {
            None
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut nav = Navigator::default();
        assert_eq!(nav.begin(NavigationRequest::link("/about")), Admission::Started);
        let fetch = nav.hidden().unwrap();
        assert_eq!(fetch.url, "/about");
        assert_eq!(nav.state(), TransitionState::Fetching);
        assert!(nav.fetched(fetch.ticket).is_some());
        nav.mounted();
        assert_eq!(nav.state(), TransitionState::ShowingNext);
        assert!(nav.shown().is_none());
        assert!(nav.is_idle());
    }

    #[test]
    fn same_origin_requires_a_host_boundary() {
        let origin = "https://site.com";
        assert!(is_same_origin("https://site.com", origin));
        assert!(is_same_origin("https://site.com/about", origin));
        assert!(is_same_origin("https://site.com?lang=fr", origin));
        assert!(is_same_origin("https://site.com#top", origin));
        assert!(!is_same_origin("https://site.com.evil.org/about", origin));
        assert!(!is_same_origin("https://site.com:8080/about", origin));
        assert!(!is_same_origin("http://site.com/about", origin));
        assert!(!is_same_origin("/about", ""));
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut nav = Navigator::default();
        nav.begin(NavigationRequest::link("/a"));
        let fetch = nav.hidden().unwrap();
        assert!(nav.fetched(FetchTicket(fetch.ticket.0 + 1)).is_none());
        assert!(!nav.failed(FetchTicket(99)));
        assert_eq!(nav.state(), TransitionState::Fetching);
    }

    #[test]
    fn busy_policy_drop_all_drops_history() {
        let mut nav = Navigator::new(NavigationConfig {
            busy_policy: BusyPolicy::DropAll,
        });
        nav.begin(NavigationRequest::link("/a"));
        assert_eq!(
            nav.begin(NavigationRequest::history("/b")),
            Admission::Dropped
        );
        assert!(nav.queued().is_none());
    }

    #[test]
    fn steps_out_of_order_are_ignored() {
        let mut nav = Navigator::default();
        assert!(nav.hidden().is_none());
        nav.mounted();
        assert!(nav.shown().is_none());
        assert!(nav.is_idle());
    }
}
