use plaza_core::{ClientMessage, ServerMessage};

use crate::utils::{TestConn, init_tracing, test_gateway};

#[test]
fn test_new_user_notified_to_existing_peers() {
    init_tracing();
    let gateway = test_gateway();

    let mut early = TestConn::connect(&gateway, "aaaa-early");
    early.send(
        &gateway,
        ClientMessage::JoinRoom {
            room_id: "call-1".into(),
            user_name: "Ada".into(),
        },
    );
    assert!(early.try_next().is_none());

    let mut late = TestConn::connect(&gateway, "bbbb-late");
    late.send(
        &gateway,
        ClientMessage::JoinRoom {
            room_id: "call-1".into(),
            user_name: "Bea".into(),
        },
    );

    // The notification is the cue for existing peers to initiate offers;
    // the newcomer itself hears nothing.
    match early.next() {
        ServerMessage::NewUser { user_id, user_name } => {
            assert_eq!(user_id, late.id);
            assert_eq!(user_name, "Bea");
        }
        other => panic!("expected newUser, got {other:?}"),
    }
    assert!(late.try_next().is_none());

    assert_eq!(gateway.video().participant_count("call-1"), 2);
}
