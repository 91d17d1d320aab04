use plaza_core::{ClientMessage, ServerMessage};
use serde_json::json;

use crate::utils::{TestConn, init_tracing, test_gateway};

fn join_call(conn: &mut TestConn, gateway: &plaza_server::Gateway, name: &str) {
    conn.send(
        gateway,
        ClientMessage::JoinRoom {
            room_id: "call-1".into(),
            user_name: name.into(),
        },
    );
}

#[test]
fn test_relay_rewrites_sender_identity() {
    init_tracing();
    let gateway = test_gateway();

    let mut a = TestConn::connect(&gateway, "aaaa-offerer");
    let mut b = TestConn::connect(&gateway, "bbbb-answerer");
    join_call(&mut a, &gateway, "Ada");
    join_call(&mut b, &gateway, "Bea");
    a.drain();
    b.drain();

    // The sender forges its identity claim; the relay must replace it with
    // the transport-established one.
    let sdp = json!({"type": "offer", "sdp": "v=0\r\nfake"});
    b.send(
        &gateway,
        ClientMessage::Offer {
            sdp: sdp.clone(),
            room_id: "call-1".into(),
            user_id: a.id.as_str().into(),
            user_name: "Bea".into(),
        },
    );

    match a.next() {
        ServerMessage::Offer {
            offer,
            user_id,
            user_name,
        } => {
            assert_eq!(offer, sdp);
            assert_eq!(user_id, b.id, "sender id must be the real connection id");
            assert_eq!(user_name, "Bea");
        }
        other => panic!("expected offer, got {other:?}"),
    }
    assert!(b.try_next().is_none());
}

#[test]
fn test_answer_and_candidate_relay() {
    init_tracing();
    let gateway = test_gateway();

    let mut a = TestConn::connect(&gateway, "aaaa-offerer");
    let mut b = TestConn::connect(&gateway, "bbbb-answerer");
    join_call(&mut a, &gateway, "Ada");
    join_call(&mut b, &gateway, "Bea");
    a.drain();
    b.drain();

    let answer = json!({"type": "answer", "sdp": "v=0\r\nanswer"});
    a.send(
        &gateway,
        ClientMessage::Answer {
            sdp: answer.clone(),
            room_id: "call-1".into(),
            user_id: b.id.as_str().into(),
            user_name: "Ada".into(),
        },
    );
    match b.next() {
        ServerMessage::Answer {
            answer: payload,
            user_id,
            ..
        } => {
            assert_eq!(payload, answer);
            assert_eq!(user_id, a.id);
        }
        other => panic!("expected answer, got {other:?}"),
    }

    let candidate = json!({"candidate": "candidate:1 1 udp 2122", "sdpMid": "0"});
    a.send(
        &gateway,
        ClientMessage::Candidate {
            candidate: candidate.clone(),
            room_id: "call-1".into(),
            user_id: b.id.as_str().into(),
            user_name: "Ada".into(),
        },
    );
    match b.next() {
        ServerMessage::Candidate {
            candidate: payload,
            user_id,
            ..
        } => {
            assert_eq!(payload, candidate);
            assert_eq!(user_id, a.id);
        }
        other => panic!("expected candidate, got {other:?}"),
    }
}
