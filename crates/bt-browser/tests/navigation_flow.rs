//! End-to-end account and navigation flows on an in-memory store.

use bt_browser::{BrowserWindow, HeadlessEngine, NavigationEvent, TabId};
use bt_policy::{NavigationPolicy, Verdict};
use bt_profile::{GUEST, HistoryLedger, Profile, ProfileSession, ProfileStore};
use bt_types::error::BrowserError;
use bt_vfs::MemoryVfs;

fn store() -> ProfileStore {
    ProfileStore::new(Box::new(MemoryVfs::new()), "/accounts")
}

fn open(store: ProfileStore, user: &str, password: Option<&str>) -> BrowserWindow {
    let session = ProfileSession::login(store, user, password).unwrap();
    let mut window = BrowserWindow::new(
        session,
        NavigationPolicy::default(),
        Box::new(HeadlessEngine::new()),
    );
    window.pump_events();
    window
}

#[test]
fn create_then_load_yields_defaults_with_username() {
    let mut s = store();
    s.create("newcomer").unwrap();
    let loaded = s.load("newcomer");
    assert_eq!(
        loaded,
        Profile {
            username: "newcomer".into(),
            ..Profile::default()
        }
    );
}

#[test]
fn guest_can_never_be_deleted() {
    let mut s = store();
    s.save(GUEST, &Profile::default());
    for _ in 0..2 {
        assert!(matches!(s.delete(GUEST), Err(BrowserError::ProtectedAccount(_))));
    }
    assert!(s.try_load(GUEST).unwrap().is_some());
    assert!(s.list().contains(GUEST));
}

#[test]
fn browsing_session_persists_across_logins() {
    let mut s = store();
    s.create("alice").unwrap();
    let mut w = open(s, "alice", None);

    for url in [
        "https://a.example/",
        "https://a.example/",
        "https://b.example/",
        "https://ads.doubleclick.net/x",
        "https://a.example/",
    ] {
        w.click_link(url).unwrap();
        w.pump_events();
    }
    assert_eq!(w.coins(), 4, "duplicates still earn; blocked links do not");
    assert_eq!(
        w.history(),
        ["https://a.example/", "https://b.example/", "https://a.example/"]
    );

    w.remove_history("https://a.example/");
    let s = w.into_store();
    let reloaded = s.load("alice");
    assert_eq!(reloaded.history, ["https://b.example/"]);
    assert_eq!(reloaded.coins, 4);

    let w = open(s, "alice", None);
    assert_eq!(w.coins(), 4);
}

#[test]
fn incognito_gates_history_and_coins_independently_of_policy_flags() {
    let mut s = store();
    let mut p = s.create("bob").unwrap();
    p.incognito = true;
    p.history = vec!["https://before.example/".into()];
    s.save("bob", &p);

    let policy = NavigationPolicy::default();
    let verdict = policy.evaluate(&NavigationEvent::link("https://x.example/", TabId(1)), &p);
    assert_eq!(
        verdict,
        Verdict::Allowed {
            reward: true,
            record: false
        }
    );

    let mut w = open(s, "bob", None);
    for url in ["https://x.example/", "https://y.example/"] {
        w.click_link(url).unwrap();
        w.pump_events();
    }
    assert_eq!(w.history(), ["https://before.example/"]);
    assert_eq!(w.coins(), 0);
}

#[test]
fn link_clicks_requested_before_commit_each_earn() {
    let mut s = store();
    s.create("dana").unwrap();
    let mut w = open(s, "dana", None);
    let tab = w.active_tab().map(|t| t.id).unwrap();

    assert!(w.on_navigation_requested(&NavigationEvent::link("https://a.example/", tab)));
    assert!(w.on_navigation_requested(&NavigationEvent::link("https://b.example/", tab)));
    w.pump_events();

    assert_eq!(w.coins(), 2);
    assert_eq!(w.history(), ["https://b.example/", "https://a.example/"]);
    assert_eq!(w.address(), Some("https://b.example/"));
}

#[test]
fn blocked_request_between_queued_clicks_takes_no_slot() {
    let mut s = store();
    s.create("dana").unwrap();
    let mut w = open(s, "dana", None);

    w.click_link("https://a.example/").unwrap();
    assert!(!w.click_link("https://adservice.google.com/x").unwrap());
    w.navigate_address("typed.example").unwrap();
    w.click_link("https://b.example/").unwrap();
    w.pump_events();

    assert_eq!(w.coins(), 2);
    assert_eq!(w.history(), ["https://b.example/", "https://a.example/"]);
    let saved = w.into_store().load("dana");
    assert_eq!(saved.coins, 2);
}

#[test]
fn back_and_forward_interleaved_with_queued_clicks() {
    let mut s = store();
    s.create("erik").unwrap();
    let mut w = open(s, "erik", None);
    let home = w.homepage();

    w.click_link("https://a.example/").unwrap();
    w.pump_events();

    // Back is aimed at the homepage, but a click commits first.
    w.click_link("https://b.example/").unwrap();
    assert!(w.go_back().unwrap());
    w.pump_events();
    assert_eq!(w.address(), Some(home.as_str()));
    assert_eq!(w.coins(), 2);

    assert!(w.go_back().unwrap());
    w.pump_events();
    assert_eq!(w.address(), Some("https://b.example/"));

    // Forward then click, both queued.
    assert!(w.go_forward().unwrap());
    w.click_link("https://c.example/").unwrap();
    w.pump_events();
    assert_eq!(w.address(), Some("https://c.example/"));
    let tab = w.active_tab().unwrap();
    assert!(!tab.nav.can_go_forward());
    assert_eq!(w.coins(), 3);
    assert_eq!(
        w.history(),
        ["https://c.example/", "https://b.example/", "https://a.example/"]
    );
}

#[test]
fn wrong_password_then_retry() {
    let mut s = store();
    let mut p = s.create("carol").unwrap();
    p.password = "letmein".into();
    s.save("carol", &p);

    let err = s.authenticate("carol", Some("nope")).unwrap_err();
    assert!(matches!(err, BrowserError::InvalidCredential(_)));
    let w = open(s, "carol", Some("letmein"));
    assert_eq!(w.session().key(), "carol");
}

#[test]
fn history_ledger_examples() {
    let mut p = Profile {
        history: vec!["a".into(), "b".into()],
        ..Profile::default()
    };
    let mut ledger = HistoryLedger::new(&mut p);
    ledger.record("b");
    assert_eq!(ledger.list(), ["b", "a"]);
    ledger.record("c");
    assert_eq!(p.history, ["a", "b", "c"]);

    let mut p = Profile {
        history: vec!["a".into(), "b".into(), "a".into(), "b".into()],
        ..Profile::default()
    };
    HistoryLedger::new(&mut p).remove("b");
    assert_eq!(p.history, ["a"]);
}
