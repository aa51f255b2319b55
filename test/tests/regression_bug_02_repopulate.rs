/// REGRESSION TEST FOR BUG #2: selecting a node twice rebuilt its proxies
///
/// THE BUG: Every selection repopulated the node, registering a second set
/// of properties and resending the node with new pin ids. Portals made on
/// the first set pointed at properties the remote side no longer showed.
///
/// THE FIX: Population runs once per node until it is marked for reload.

use scenebridge_client::{shared::ShowAs, InboundEvent};
use scenebridge_test::{assert_portal_bound, Harness, Stage};

#[test]
fn bug_02_second_selection_is_a_no_op() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);

    harness.select(&mut stage.scene, stage.cube_guid);
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    let properties = harness.engine.properties().len();
    harness.transport.clear();

    harness.select(&mut stage.scene, stage.cube_guid);

    assert_eq!(harness.engine.properties().len(), properties);
    assert_eq!(harness.property_id(stage.cube, "Scale"), Some(scale));
    assert!(harness.transport.is_empty());
}

#[test]
fn bug_02_portal_survives_reselection() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.cube_guid);
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    harness.send(
        &mut stage.scene,
        InboundEvent::PinShowAsChanged {
            pin_id: scale,
            show_as: ShowAs::InputPin,
        },
    );
    let portal_id = harness.engine.portals().portal_of(&scale).unwrap();

    harness.select(&mut stage.scene, stage.cube_guid);

    assert_portal_bound!(harness.engine, portal_id);
    assert_eq!(harness.engine.portals().portal_of(&scale), Some(portal_id));
}
