//! Integration tests for the NICK/USER/PASS handshake and the registration gate.

mod common;

use common::{TestNet, codes};

#[test]
fn nick_then_user_registers_once() {
    let net = TestNet::new();
    let mut alice = net.connect();

    assert!(net.request(&mut alice, "NICK alice").is_empty());
    let burst = net.request(&mut alice, "USER alice 0 * :Alice Liddell");

    assert_eq!(codes(&burst), vec!["001", "002", "003", "004"]);
    assert_eq!(
        burst[0],
        ":irc.test 001 alice :Welcome to the Internet Relay Network alice!~alice@127.0.0.1"
    );
    assert_eq!(
        burst[1],
        ":irc.test 002 alice :Your host is irc.test, running version ircserv-test"
    );
    assert_eq!(burst[3], ":irc.test 004 alice irc.test ircserv-test iswo opsitnmlbvk");

    net.server.with_state(|state| {
        let session = state.sessions.find_by_nick("alice").expect("alice registered");
        assert_eq!(session.id, alice.id);
        assert_eq!(session.realname, "Alice Liddell");
    });
}

#[test]
fn user_then_nick_registers_once() {
    let net = TestNet::new();
    let mut bob = net.connect();

    assert!(net.request(&mut bob, "USER bob 0 * :Bob").is_empty());
    let burst = net.request(&mut bob, "NICK bob");
    assert_eq!(codes(&burst), vec!["001", "002", "003", "004"]);

    // A later NICK is a rename, not a second burst.
    let lines = net.request(&mut bob, "NICK robert");
    assert!(!codes(&lines).contains(&"001"));
    assert_eq!(lines, vec![":bob!~bob@127.0.0.1 NICK robert"]);
}

#[test]
fn duplicate_nick_is_rejected() {
    let net = TestNet::new();
    let alice = net.register("alice");
    let mut other = net.connect();

    let lines = net.request(&mut other, "NICK alice");
    assert_eq!(lines, vec![":irc.test 433 * alice :Nickname is already in use"]);

    net.server.with_state(|state| {
        assert_eq!(state.sessions.find_by_nick("alice").map(|s| s.id), Some(alice.id));
        assert!(state.sessions.get(other.id).is_some_and(|s| s.nick.is_empty()));
    });
}

#[test]
fn nick_claimed_before_user_completes() {
    let net = TestNet::new();
    let mut first = net.connect();
    let mut second = net.connect();

    net.request(&mut first, "NICK carol");
    net.request(&mut second, "NICK carol");
    let burst = net.request(&mut second, "USER carol 0 * :Second");
    assert_eq!(codes(&burst), vec!["001", "002", "003", "004"]);

    let lines = net.request(&mut first, "USER carol 0 * :First");
    assert_eq!(lines, vec![":irc.test 433 carol carol :Nickname is already in use"]);

    // Picking another nick finishes the handshake.
    let burst = net.request(&mut first, "NICK carol2");
    assert_eq!(codes(&burst), vec!["001", "002", "003", "004"]);
}

#[test]
fn erroneous_and_missing_nicks() {
    let net = TestNet::new();
    let mut user = net.connect();

    assert_eq!(
        net.request(&mut user, "NICK 9lives"),
        vec![":irc.test 432 * 9lives :Erroneous nickname"]
    );
    assert_eq!(
        net.request(&mut user, "NICK waytoolongnickname"),
        vec![":irc.test 432 * waytoolongnickname :Erroneous nickname"]
    );
    assert_eq!(
        net.request(&mut user, "NICK"),
        vec![":irc.test 431 * :No nickname given"]
    );
}

#[test]
fn user_needs_four_params() {
    let net = TestNet::new();
    let mut user = net.connect();

    assert_eq!(
        net.request(&mut user, "USER only two"),
        vec![":irc.test 461 * USER :Not enough parameters"]
    );
}

#[test]
fn reregistration_is_refused() {
    let net = TestNet::new();
    let mut alice = net.register("alice");

    assert_eq!(
        net.request(&mut alice, "USER alice 0 * :Again"),
        vec![":irc.test 462 alice :Unauthorized command (already registered)"]
    );
    assert_eq!(
        net.request(&mut alice, "PASS hunter2"),
        vec![":irc.test 462 alice :Unauthorized command (already registered)"]
    );
}

#[test]
fn pass_is_stored_before_registration() {
    let net = TestNet::new();
    let mut user = net.connect();

    assert!(net.request(&mut user, "PASS hunter2").is_empty());
    assert_eq!(
        net.request(&mut user, "PASS"),
        vec![":irc.test 461 * PASS :Not enough parameters"]
    );
    net.server.with_state(|state| {
        let session = state.sessions.get(user.id).expect("live session");
        assert_eq!(session.password.as_deref(), Some("hunter2"));
    });
}

#[test]
fn commands_are_gated_until_registered() {
    let net = TestNet::new();
    let mut user = net.connect();

    for line in ["JOIN #test", "PRIVMSG bob :hi", "WHOIS bob", "FOOBAR"] {
        assert_eq!(
            net.request(&mut user, line),
            vec![":irc.test 451 * :You have not registered"],
            "{line}"
        );
    }
    assert!(!net.channel_exists("#test"));

    // PING is allowed before registration.
    assert_eq!(
        net.request(&mut user, "PING abc"),
        vec![":irc.test PONG irc.test :abc"]
    );
}

#[test]
fn unknown_command_after_registration() {
    let net = TestNet::new();
    let mut alice = net.register("alice");

    assert_eq!(
        net.request(&mut alice, "frobnicate now"),
        vec![":irc.test 421 alice FROBNICATE :Unknown command"]
    );
}

#[test]
fn commands_are_case_insensitive() {
    let net = TestNet::new();
    let mut user = net.connect();

    net.request(&mut user, "nick dave");
    let burst = net.request(&mut user, "user dave 0 * :Dave");
    assert_eq!(codes(&burst), vec!["001", "002", "003", "004"]);
}

#[test]
fn nick_change_reaches_channel_peers_once() {
    let net = TestNet::new();
    let mut alice = net.register_in("alice", &["#a", "#b"]);
    let mut bob = net.register_in("bob", &["#a", "#b"]);
    alice.drain();

    let lines = net.request(&mut alice, "NICK alicia");
    assert_eq!(lines, vec![":alice!~alice@127.0.0.1 NICK alicia"]);
    assert_eq!(bob.drain(), vec![":alice!~alice@127.0.0.1 NICK alicia"]);

    net.server.with_state(|state| {
        assert!(state.sessions.find_by_nick("alice").is_none());
        assert_eq!(state.sessions.find_by_nick("alicia").map(|s| s.id), Some(alice.id));
        // Operator status follows the nick.
        let channel = state.channels.lookup("#a").expect("#a exists");
        assert!(channel.is_operator("alicia"));
        assert!(!channel.is_operator("alice"));
    });
}
