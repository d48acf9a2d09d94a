use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use chrono::TimeDelta;

use helpdesk::classifier::SuggestedTopic;
use helpdesk::error::Result;
use helpdesk::session::{
    ClarificationSessions, ManualClock, SessionConfig, SessionSweeper, TopicChoice,
};

fn topics(prefix: &str, count: usize) -> Vec<SuggestedTopic> {
    (1..=count)
        .map(|i| SuggestedTopic {
            title: format!("{prefix} topic {i}"),
            topic_key: format!("{prefix}-{i}"),
            score: 0.8,
            snippet: String::new(),
        })
        .collect()
}

#[test]
fn independent_conversations_do_not_interfere() {
    let sessions = Arc::new(ClarificationSessions::default());
    let threads = 8;
    let per_thread = 200;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let sessions = sessions.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..per_thread {
                    let id = format!("conv-{t}-{i}");
                    sessions.save(&id, "problem", topics(&id, 3));
                    let choice = sessions.resolve(&id, "3");
                    assert_eq!(
                        choice.topic().map(|topic| topic.topic_key.clone()),
                        Some(format!("{id}-3"))
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sessions.stored_count(), 0);
}

#[test]
fn concurrent_resolves_select_at_most_once() {
    let sessions = Arc::new(ClarificationSessions::default());
    sessions.save("shared", "problem", topics("shared", 2));

    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let sessions = sessions.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                sessions.resolve("shared", "1").is_selected()
            })
        })
        .collect();

    let selections = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|selected| *selected)
        .count();

    assert_eq!(selections, 1);
    assert!(sessions.read("shared").is_none());
}

#[test]
fn resolve_sees_either_old_or_new_offer_during_overwrites() {
    let sessions = Arc::new(ClarificationSessions::default());
    let old = topics("old", 2);
    let new = topics("new", 2);
    sessions.save("conv", "old query", old.clone());

    let writer = {
        let sessions = sessions.clone();
        let new = new.clone();
        thread::spawn(move || {
            for _ in 0..500 {
                sessions.save("conv", "new query", new.clone());
            }
        })
    };

    for _ in 0..500 {
        if let TopicChoice::Selected {
            topic,
            original_query,
        } = sessions.resolve("conv", "2")
        {
            // Never a mix of the two offers.
            match original_query.as_str() {
                "old query" => assert_eq!(topic, old[1]),
                "new query" => assert_eq!(topic, new[1]),
                other => panic!("unexpected query {other}"),
            }
        }
    }

    writer.join().unwrap();
}

#[test]
fn sweeper_reclaims_abandoned_offers() -> Result<()> {
    let clock = Arc::new(ManualClock::default());
    let sessions = Arc::new(ClarificationSessions::with_clock(
        &SessionConfig::default(),
        clock.clone(),
    ));

    for i in 0..50 {
        sessions.save(&format!("abandoned-{i}"), "problem", topics("a", 2));
    }
    clock.advance(TimeDelta::minutes(16));
    sessions.save("fresh", "problem", topics("f", 2));

    let mut sweeper = SessionSweeper::start(sessions.clone(), Duration::from_millis(10))?;

    let deadline = Instant::now() + Duration::from_secs(5);
    while sessions.stored_count() > 1 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    sweeper.stop();

    assert_eq!(sessions.stored_count(), 1);
    assert!(sessions.read("fresh").is_some());
    Ok(())
}
