//! Integration tests for channel lifecycle: JOIN, PART, NAMES, LIST, TOPIC,
//! INVITE and KICK.

mod common;

use common::{TestNet, codes};

#[test]
fn join_creates_channel_with_creator_as_operator() {
    let net = TestNet::new();
    let mut alice = net.register("alice");

    let lines = net.request(&mut alice, "JOIN #test");
    assert_eq!(lines[0], ":alice!~alice@127.0.0.1 JOIN :#test");
    assert_eq!(lines[1], ":irc.test 332 alice #test :Welcome to #test");
    assert_eq!(lines[2], ":irc.test 353 alice = #test :@alice");
    assert_eq!(lines[3], ":irc.test 366 alice #test :End of NAMES list");
    assert_eq!(codes(&lines[4..]), vec!["329"]);

    assert_eq!(
        net.request(&mut alice, "NAMES #test"),
        vec![
            ":irc.test 353 alice = #test :@alice",
            ":irc.test 366 alice #test :End of NAMES list",
        ]
    );
}

#[test]
fn last_part_destroys_channel() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#test"]);

    let lines = net.request(&mut alice, "PART #test :bye");
    assert_eq!(lines, vec![":alice!~alice@127.0.0.1 PART #test :bye"]);
    assert!(!net.channel_exists("#test"));

    assert_eq!(
        net.request(&mut alice, "LIST"),
        vec![
            ":irc.test 321 alice Channel :Users  Name",
            ":irc.test 323 alice :End of LIST",
        ]
    );
}

#[test]
fn join_is_case_insensitive_and_idempotent() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#Rust"]);
    let mut bob = net.register("bob");

    let lines = net.request(&mut bob, "JOIN #RUST");
    assert_eq!(lines[0], ":bob!~bob@127.0.0.1 JOIN :#rust");
    assert_eq!(alice.drain(), vec![":bob!~bob@127.0.0.1 JOIN :#rust"]);

    // Already a member: nothing happens.
    assert!(net.request(&mut bob, "JOIN #rust").is_empty());
    assert!(alice.drain().is_empty());

    assert_eq!(
        net.request(&mut bob, "NAMES #rust")[0],
        ":irc.test 353 bob = #rust :@alice bob"
    );
}

#[test]
fn join_list_with_keys_and_bad_names() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#locked"]);
    net.request(&mut alice, "MODE #locked +k sesame");
    let mut bob = net.register("bob");

    let lines = net.request(&mut bob, "JOIN #locked,nochan,#open wrong");
    assert!(lines.contains(&":irc.test 475 bob #locked :Cannot join channel (+k)".to_string()));
    assert!(lines.contains(&":irc.test 403 bob nochan :No such channel".to_string()));
    assert!(lines.contains(&":bob!~bob@127.0.0.1 JOIN :#open".to_string()));

    let lines = net.request(&mut bob, "JOIN #locked sesame");
    assert_eq!(lines[0], ":bob!~bob@127.0.0.1 JOIN :#locked");
}

#[test]
fn join_refuses_malformed_channel_names() {
    let net = TestNet::new();
    let mut alice = net.register("alice");

    assert_eq!(
        net.request(&mut alice, "JOIN :#foo bar"),
        vec![":irc.test 403 alice #foo bar :No such channel"]
    );
    assert!(!net.channel_exists("#foo bar"));
    assert!(!net.channel_exists("#foo"));

    let long = format!("#{}", "x".repeat(50));
    assert_eq!(codes(&net.request(&mut alice, &format!("JOIN {long}"))), vec!["403"]);
    assert!(!net.channel_exists(&long));

    assert_eq!(codes(&net.request(&mut alice, "JOIN #ring\x07")), vec!["403"]);
    assert_eq!(net.server.with_state(|state| state.channels.len()), 0);
}

#[test]
fn placeholder_text_in_channel_names_is_kept() {
    let net = TestNet::new();
    let mut alice = net.register("alice");

    let lines = net.request(&mut alice, "JOIN #<topic>");
    assert_eq!(lines[0], ":alice!~alice@127.0.0.1 JOIN :#<topic>");
    assert_eq!(lines[1], ":irc.test 332 alice #<topic> :Welcome to #<topic>");
    assert_eq!(lines[2], ":irc.test 353 alice = #<topic> :@alice");
}

#[test]
fn join_zero_parts_everything() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#a", "#b"]);
    let mut bob = net.register_in("bob", &["#a"]);
    alice.drain();

    let lines = net.request(&mut alice, "JOIN 0");
    assert_eq!(
        lines,
        vec![
            ":alice!~alice@127.0.0.1 PART #a :alice",
            ":alice!~alice@127.0.0.1 PART #b :alice",
        ]
    );
    assert_eq!(bob.drain(), vec![":alice!~alice@127.0.0.1 PART #a :alice"]);
    assert!(net.channel_exists("#a"));
    assert!(!net.channel_exists("#b"));
}

#[test]
fn part_errors_and_lists() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#a", "#b"]);
    let _bob = net.register_in("bob", &["#c"]);

    let lines = net.request(&mut alice, "PART #a,#nope,#c");
    assert_eq!(
        lines,
        vec![
            ":alice!~alice@127.0.0.1 PART #a :alice",
            ":irc.test 403 alice #nope :No such channel",
            ":irc.test 442 alice #c :You're not on that channel",
        ]
    );
    assert_eq!(
        net.request(&mut alice, "PART"),
        vec![":irc.test 461 alice PART :Not enough parameters"]
    );
}

#[test]
fn membership_is_symmetric() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#a", "#b"]);
    let bob = net.register_in("bob", &["#a"]);
    net.request(&mut alice, "PART #b");

    net.server.with_state(|state| {
        for channel in state.channels.iter() {
            for member in &channel.members {
                let session = state.sessions.get(*member).expect("member is live");
                assert!(session.channels.contains(&channel.name));
            }
        }
        for id in [alice.id, bob.id] {
            let session = state.sessions.get(id).expect("live");
            for name in &session.channels {
                let channel = state.channels.lookup(name).expect("joined channel exists");
                assert!(channel.is_member(id));
            }
        }
    });
}

#[test]
fn kick_requires_operator() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#test"]);
    let mut bob = net.register_in("bob", &["#test"]);
    let mut carol = net.register_in("carol", &["#test"]);
    alice.drain();
    bob.drain();

    assert_eq!(
        net.request(&mut carol, "KICK #test bob"),
        vec![":irc.test 482 carol #test :You're not channel operator"]
    );
    net.server.with_state(|state| {
        let channel = state.channels.lookup("#test").expect("exists");
        assert!(channel.is_member(bob.id));
    });
    assert!(bob.drain().is_empty());

    let lines = net.request(&mut alice, "KICK #test bob :behave");
    assert_eq!(lines, vec![":alice!~alice@127.0.0.1 KICK #test bob :behave"]);
    assert_eq!(bob.drain(), lines);
    assert_eq!(carol.drain(), lines);
    net.server.with_state(|state| {
        let channel = state.channels.lookup("#test").expect("exists");
        assert!(!channel.is_member(bob.id));
        assert!(!state.sessions.get(bob.id).expect("live").channels.contains("#test"));
    });
}

#[test]
fn kick_errors() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#test"]);
    let _dave = net.register("dave");

    assert_eq!(
        net.request(&mut alice, "KICK #nope dave"),
        vec![":irc.test 403 alice #nope :No such channel"]
    );
    assert_eq!(
        net.request(&mut alice, "KICK #test dave"),
        vec![":irc.test 441 alice dave #test :They aren't on that channel"]
    );
    assert_eq!(
        net.request(&mut alice, "KICK #test"),
        vec![":irc.test 461 alice KICK :Not enough parameters"]
    );
}

#[test]
fn topic_query_and_set() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#test"]);
    let mut bob = net.register_in("bob", &["#test"]);
    alice.drain();

    assert_eq!(
        net.request(&mut bob, "TOPIC #test"),
        vec![":irc.test 332 bob #test :Welcome to #test"]
    );
    // +t is on by default.
    assert_eq!(
        net.request(&mut bob, "TOPIC #test :mine now"),
        vec![":irc.test 482 bob #test :You're not channel operator"]
    );

    let lines = net.request(&mut alice, "TOPIC #test :Rust talk");
    assert_eq!(lines, vec![":alice!~alice@127.0.0.1 TOPIC #test :Rust talk"]);
    assert_eq!(bob.drain(), lines);

    net.request(&mut alice, "MODE #test -t");
    bob.drain();
    net.request(&mut bob, "TOPIC #test :");
    assert_eq!(
        net.request(&mut bob, "TOPIC #test"),
        vec![":irc.test 331 bob #test :No topic is set"]
    );
}

#[test]
fn topic_requires_membership() {
    let net = TestNet::new();
    let _alice = net.register_in("alice", &["#test"]);
    let mut bob = net.register("bob");

    assert_eq!(
        net.request(&mut bob, "TOPIC #test"),
        vec![":irc.test 442 bob #test :You're not on that channel"]
    );
}

#[test]
fn invite_admits_past_invite_only() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#vip"]);
    let mut bob = net.register("bob");
    net.request(&mut alice, "MODE #vip +i");

    assert_eq!(
        net.request(&mut bob, "JOIN #vip"),
        vec![":irc.test 473 bob #vip :Cannot join channel (+i)"]
    );

    assert_eq!(
        net.request(&mut alice, "INVITE bob #vip"),
        vec![":irc.test 341 alice #vip bob"]
    );
    assert_eq!(bob.drain(), vec![":alice!~alice@127.0.0.1 INVITE bob :#vip"]);

    let lines = net.request(&mut bob, "JOIN #vip");
    assert_eq!(lines[0], ":bob!~bob@127.0.0.1 JOIN :#vip");
    net.server.with_state(|state| {
        let channel = state.channels.lookup("#vip").expect("exists");
        assert!(!channel.modes.invited.contains("bob"));
    });
    alice.drain();

    assert_eq!(
        net.request(&mut alice, "INVITE bob #vip"),
        vec![":irc.test 443 alice bob #vip :is already on channel"]
    );
    assert_eq!(
        net.request(&mut alice, "INVITE nobody #vip"),
        vec![":irc.test 401 alice nobody :No such nick/channel"]
    );
}

#[test]
fn hidden_channels_are_not_listed_to_outsiders() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#secret", "#public"]);
    net.request(&mut alice, "MODE #secret +s");
    let mut bob = net.register("bob");

    let lines = net.request(&mut bob, "LIST");
    assert_eq!(codes(&lines), vec!["321", "322", "323"]);
    assert_eq!(lines[1], ":irc.test 322 bob #public 1 :Welcome to #public");

    assert_eq!(
        net.request(&mut bob, "NAMES #secret"),
        vec![":irc.test 366 bob #secret :End of NAMES list"]
    );

    // Members still see it.
    let lines = net.request(&mut alice, "LIST #secret");
    assert_eq!(codes(&lines), vec!["321", "322", "323"]);
    let lines = net.request(&mut alice, "NAMES");
    assert_eq!(
        lines,
        vec![
            ":irc.test 353 alice = #public :@alice",
            ":irc.test 353 alice @ #secret :@alice",
            ":irc.test 366 alice * :End of NAMES list",
        ]
    );
}

#[test]
fn channel_lines_are_written_to_transcript_files() {
    let dir = tempfile::tempdir().unwrap();
    let logs = dir.path().join("logs");
    let net = TestNet::with_config(&format!(
        "[server]\nname = \"irc.test\"\n\n[logs]\ntranscripts = true\npath = {:?}\n",
        logs.display().to_string()
    ));
    let mut alice = net.register_in("alice", &["#log"]);
    let mut bob = net.register_in("bob", &["#log"]);
    net.request(&mut alice, "PRIVMSG #log :hello");
    net.request(&mut bob, "QUIT :gone");

    let text = std::fs::read_to_string(logs.join("ircserv_#log.ircservlog")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with(":SERVER Channel created at "));
    assert_eq!(
        &lines[1..],
        [
            ":alice!~alice@127.0.0.1 JOIN :#log",
            ":bob!~bob@127.0.0.1 JOIN :#log",
            ":alice!~alice@127.0.0.1 PRIVMSG #log :hello",
            ":bob!~bob@127.0.0.1 QUIT :gone",
        ]
    );
}
