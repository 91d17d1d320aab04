use plaza_core::{ClientMessage, ServerMessage};

use crate::utils::{TestConn, init_tracing, test_gateway};

fn join(room: &str) -> ClientMessage {
    ClientMessage::PlayerJoin {
        room: room.into(),
        name: None,
        x: None,
        y: None,
    }
}

#[test]
fn test_rejoin_switches_room() {
    init_tracing();
    let gateway = test_gateway();

    let mut mover = TestConn::connect(&gateway, "aaaa-mover");
    let mut stayer = TestConn::connect(&gateway, "bbbb-stay");
    mover.send(&gateway, join("r1"));
    stayer.send(&gateway, join("r1"));
    mover.drain();
    stayer.drain();

    // Joining a second room implicitly leaves the first.
    mover.send(&gateway, join("r2"));

    match stayer.next() {
        ServerMessage::PlayerLeft(id) => assert_eq!(id, mover.id),
        other => panic!("expected player-left, got {other:?}"),
    }
    match stayer.next() {
        ServerMessage::ChatMembers(roster) => {
            assert_eq!(roster.len(), 1);
            assert_eq!(roster[0].id, stayer.id);
        }
        other => panic!("expected chatMembers, got {other:?}"),
    }

    // Membership now lives in the latest room only.
    assert_eq!(gateway.presence().roster("r1").len(), 1);
    assert_eq!(gateway.presence().roster("r2").len(), 1);
    assert_eq!(gateway.presence().roster("r2")[0].id, mover.id);

    // The mover is out of the old broadcast group: room-wide chat for r1
    // no longer reaches it.
    stayer.send(
        &gateway,
        ClientMessage::SendMessage(plaza_core::ChatMessage {
            sender: "Bea".into(),
            message: "still here?".into(),
            timestamp: "t0".into(),
            room_id: "r1".into(),
            profile: "p".into(),
        }),
    );
    assert!(mover.drain().iter().all(|m| !matches!(m, ServerMessage::ReceiveMessage(_))));
}
