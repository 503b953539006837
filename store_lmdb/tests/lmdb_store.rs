//! LMDB backend tests: append-only ledger order, registry upserts, and
//! persistence across reopen.

use gauss_store::{AdhocPollStore, MatchStore, PickStore, SettlementStore, VoteFilter, VoteLedger};
use gauss_store_lmdb::LmdbEnvironment;
use gauss_types::{
    AdhocPollRow, Amount, MatchId, MatchPick, MatchRecord, PollType, SettlementRecord, Timestamp,
    Vote,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
    let dir = tempfile::tempdir().expect("temp dir");
    let env = LmdbEnvironment::open(dir.path(), 8, 16 * 1024 * 1024).expect("open env");
    (dir, env)
}

fn vote(match_id: &str, poll_type: PollType, option: &str, email: &str, secs: i64) -> Vote {
    Vote {
        match_id: MatchId::from(match_id),
        poll_type,
        option_voted: option.to_string(),
        user_email: email.to_string(),
        user_name: Some(email.split('@').next().unwrap_or_default().to_string()),
        created_timestamp: Timestamp::from_secs(secs),
    }
}

fn match_record(id: &str, close_secs: i64) -> MatchRecord {
    MatchRecord {
        match_id: MatchId::from(id),
        team_1: "CSK".into(),
        team_2: "MI".into(),
        date: Timestamp::from_secs(close_secs + 1800),
        poll_close_time: Timestamp::from_secs(close_secs),
    }
}

// ---------------------------------------------------------------------------
// Vote ledger
// ---------------------------------------------------------------------------

#[test]
fn ledger_returns_votes_in_insertion_order() {
    let (_dir, env) = temp_env();
    let ledger = env.vote_ledger();
    // later timestamp inserted first: order must follow insertion, not time
    let a = vote("1", PollType::Winner, "CSK", "a@x.com", 200);
    let b = vote("1", PollType::Winner, "MI", "b@x.com", 100);
    assert_eq!(ledger.append_vote(&a).unwrap(), 0);
    assert_eq!(ledger.append_vote(&b).unwrap(), 1);

    let all = ledger.votes(&VoteFilter::all()).unwrap();
    assert_eq!(all, vec![a, b]);
    assert_eq!(ledger.vote_count().unwrap(), 2);
}

#[test]
fn ledger_filter_narrows_by_match_and_poll() {
    let (_dir, env) = temp_env();
    let ledger = env.vote_ledger();
    ledger.append_vote(&vote("1", PollType::Winner, "CSK", "a@x.com", 1)).unwrap();
    ledger.append_vote(&vote("1", PollType::VictoryMargin, "B", "a@x.com", 2)).unwrap();
    ledger.append_vote(&vote("2", PollType::Winner, "RCB", "a@x.com", 3)).unwrap();

    let m1 = ledger
        .votes(&VoteFilter {
            match_id: Some(MatchId::from("1")),
            poll_type: None,
        })
        .unwrap();
    assert_eq!(m1.len(), 2);
    let margin = ledger
        .votes(&VoteFilter {
            match_id: Some(MatchId::from("1")),
            poll_type: Some(PollType::VictoryMargin),
        })
        .unwrap();
    assert_eq!(margin.len(), 1);
    assert_eq!(margin[0].option_voted, "B");
}

#[test]
fn ledger_survives_reopen_and_keeps_appending() {
    let dir = tempfile::tempdir().expect("temp dir");
    {
        let env = LmdbEnvironment::open_default(dir.path()).unwrap();
        env.vote_ledger()
            .append_vote(&vote("1", PollType::Winner, "CSK", "a@x.com", 1))
            .unwrap();
    }
    let env = LmdbEnvironment::open_default(dir.path()).unwrap();
    let ledger = env.vote_ledger();
    assert_eq!(ledger.vote_count().unwrap(), 1);
    let seq = ledger
        .append_vote(&vote("1", PollType::Winner, "MI", "a@x.com", 2))
        .unwrap();
    assert_eq!(seq, 1);
}

// ---------------------------------------------------------------------------
// Registry stores
// ---------------------------------------------------------------------------

#[test]
fn match_put_replaces_and_get_misses_are_not_found() {
    let (_dir, env) = temp_env();
    let store = env.match_store();
    store.put_match(&match_record("5", 100)).unwrap();
    store.put_match(&match_record("5", 200)).unwrap();

    let got = store.get_match(&MatchId::from("5")).unwrap();
    assert_eq!(got.poll_close_time, Timestamp::from_secs(200));
    assert_eq!(store.iter_matches().unwrap().len(), 1);

    let err = store.get_match(&MatchId::from("99")).unwrap_err();
    assert!(matches!(err, gauss_store::StoreError::NotFound(_)));
}

#[test]
fn adhoc_rows_keep_registration_order_across_upserts() {
    let (_dir, env) = temp_env();
    let store = env.adhoc_store();
    let row = |option: &str, close: i64| AdhocPollRow {
        match_id: MatchId::from("3"),
        poll_type: PollType::Adhoc("top_scorer".into()),
        option: option.to_string(),
        poll_close_time: Timestamp::from_secs(close),
        question: None,
    };
    store.put_adhoc_option(&row("Kohli", 10)).unwrap();
    store.put_adhoc_option(&row("Dhoni", 20)).unwrap();
    store.put_adhoc_option(&row("Bumrah", 30)).unwrap();
    // re-registering keeps the original position
    store.put_adhoc_option(&row("Kohli", 40)).unwrap();

    let rows = store.iter_adhoc_options().unwrap();
    let options: Vec<&str> = rows.iter().map(|r| r.option.as_str()).collect();
    assert_eq!(options, vec!["Kohli", "Dhoni", "Bumrah"]);
    assert_eq!(rows[0].poll_close_time, Timestamp::from_secs(40));
}

#[test]
fn settlements_and_picks_roundtrip() {
    let (_dir, env) = temp_env();
    let settlements = env.settlement_store();
    let record = SettlementRecord {
        user_name: "ada".into(),
        match_id: MatchId::from("1"),
        poll_type: PollType::VictoryMargin,
        amount: "-3.125".parse::<Amount>().unwrap(),
    };
    settlements.put_settlement(&record).unwrap();
    assert_eq!(settlements.iter_settlements().unwrap(), vec![record]);

    let picks = env.pick_store();
    let pick = MatchPick {
        match_id: MatchId::from("1"),
        reasoning: "Dew favours chasing".into(),
    };
    picks.put_pick(&pick).unwrap();
    picks
        .put_pick(&MatchPick {
            reasoning: "Spin-friendly pitch".into(),
            ..pick
        })
        .unwrap();
    let stored = picks.iter_picks().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].reasoning, "Spin-friendly pitch");
}
