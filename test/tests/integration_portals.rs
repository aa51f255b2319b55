/// Portals: creation through show-as changes, values flowing through them
/// at begin-frame, and their removal

use uuid::Uuid;

use scenebridge_client::{
    shared::{PinContents, ShowAs},
    BridgeError, InboundEvent, ACTOR_MENU, PORTAL_MENU,
};
use scenebridge_shared::{ContextMenuAction, ContextMenuRequest, PortalError};
use scenebridge_test::{assert_field_eq, assert_portal_bound, bool_value, vec3, Harness, Stage};

fn with_cube_selected() -> (Stage, Harness) {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.cube_guid);
    harness.transport.clear();
    (stage, harness)
}

fn show_as(harness: &mut Harness, stage: &mut Stage, pin_id: Uuid, show_as: ShowAs) {
    harness.send(
        &mut stage.scene,
        InboundEvent::PinShowAsChanged { pin_id, show_as },
    );
}

#[test]
fn first_show_as_change_creates_a_portal() {
    let (mut stage, mut harness) = with_cube_selected();
    let scale = harness.property_id(stage.cube, "Scale").unwrap();

    show_as(&mut harness, &mut stage, scale, ShowAs::InputPin);

    let portal_id = harness.engine.portals().portal_of(&scale).unwrap();
    assert_eq!(portal_id, harness.engine.ids().deterministic(&scale.to_string()));
    assert_portal_bound!(harness.engine, portal_id);

    let portal = harness.engine.portals().get(&portal_id).unwrap();
    assert_eq!(portal.display_name, "Cube.Scale");
    assert_eq!(portal.show_as, ShowAs::InputPin);
    assert_eq!(
        harness.engine.properties().get(&scale).unwrap().show_as,
        ShowAs::InputPin
    );

    assert_eq!(
        harness.transport.show_as_changes(),
        vec![(scale, ShowAs::InputPin)]
    );
    let root_updates = harness.transport.node_updates_for(&harness.root);
    assert_eq!(root_updates.len(), 1);
    let pin = &root_updates[0].pins_to_add[0];
    assert_eq!(pin.id, portal_id);
    assert_eq!(pin.contents, PinContents::Portal { source_id: scale });
    assert_eq!(pin.data, vec3(1.0, 1.0, 1.0));
}

#[test]
fn later_changes_update_the_existing_portal() {
    let (mut stage, mut harness) = with_cube_selected();
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    show_as(&mut harness, &mut stage, scale, ShowAs::InputPin);
    let portal_id = harness.engine.portals().portal_of(&scale).unwrap();
    harness.transport.clear();

    // addressed through the portal
    show_as(&mut harness, &mut stage, portal_id, ShowAs::OutputPin);
    assert_eq!(
        harness.engine.portals().get(&portal_id).unwrap().show_as,
        ShowAs::OutputPin
    );
    // addressed through the source property
    show_as(&mut harness, &mut stage, scale, ShowAs::Property);
    assert_eq!(
        harness.engine.portals().get(&portal_id).unwrap().show_as,
        ShowAs::Property
    );

    assert_eq!(harness.engine.portals().len(), 1);
    assert_eq!(
        harness.transport.show_as_changes(),
        vec![(scale, ShowAs::OutputPin), (portal_id, ShowAs::Property)]
    );
}

#[test]
fn illegal_show_as_leaves_the_mapping_unchanged() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.light_guid);
    let temperature = harness.property_id(stage.light, "Temperature").unwrap();

    let result = harness
        .engine
        .try_change_show_as(&stage.scene, temperature, ShowAs::InputPin);
    assert!(matches!(
        result,
        Err(BridgeError::Portal(PortalError::IllegalShowAs { .. }))
    ));
    assert_eq!(harness.engine.portals().portal_of(&temperature), None);

    show_as(&mut harness, &mut stage, temperature, ShowAs::OutputPin);
    let portal_id = harness.engine.portals().portal_of(&temperature).unwrap();
    harness.transport.clear();

    show_as(&mut harness, &mut stage, portal_id, ShowAs::InputPin);
    assert_eq!(
        harness.engine.portals().get(&portal_id).unwrap().show_as,
        ShowAs::OutputPin
    );
    assert_eq!(
        harness.engine.properties().get(&temperature).unwrap().show_as,
        ShowAs::OutputPin
    );
    assert!(harness.transport.is_empty());
}

#[test]
fn unknown_pins_are_rejected() {
    let (stage, mut harness) = with_cube_selected();
    let result = harness
        .engine
        .try_change_show_as(&stage.scene, Uuid::new_v4(), ShowAs::InputPin);
    assert!(matches!(result, Err(BridgeError::UnknownPin { .. })));
}

#[test]
fn queued_values_are_applied_at_begin_frame() {
    let (mut stage, mut harness) = with_cube_selected();
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    show_as(&mut harness, &mut stage, scale, ShowAs::InputPin);
    let portal_id = harness.engine.portals().portal_of(&scale).unwrap();

    harness.push_value(&mut stage.scene, portal_id, vec3(2.0, 2.0, 2.0), 3);
    // nothing reaches the scene before the frame starts
    assert_field_eq!(stage.scene, stage.cube, "Scale", vec3(1.0, 1.0, 1.0));

    harness.engine.begin_frame(&mut stage.scene, 3);

    assert_field_eq!(stage.scene, stage.cube, "Scale", vec3(2.0, 2.0, 2.0));
    assert_eq!(harness.engine.frame(), 3);
    assert_eq!(harness.engine.inputs().len(&portal_id).unwrap(), 0);
}

#[test]
fn begin_frame_takes_newest_arrival_for_the_frame() {
    let (mut stage, mut harness) = with_cube_selected();
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    show_as(&mut harness, &mut stage, scale, ShowAs::InputPin);
    let portal_id = harness.engine.portals().portal_of(&scale).unwrap();

    for frame in [5u64, 7, 3] {
        let value = frame as f64;
        harness.push_value(&mut stage.scene, portal_id, vec3(value, value, value), frame);
    }
    harness.engine.begin_frame(&mut stage.scene, 6);

    assert_field_eq!(stage.scene, stage.cube, "Scale", vec3(7.0, 7.0, 7.0));
    // the late frame-3 arrival stays queued
    assert_eq!(harness.engine.inputs().len(&portal_id).unwrap(), 1);
}

#[test]
fn values_for_plain_properties_get_a_property_portal() {
    let (mut stage, mut harness) = with_cube_selected();
    let visible = harness.property_id(stage.cube, "Visible").unwrap();

    harness.push_value(&mut stage.scene, visible, bool_value(false), 1);
    harness.engine.begin_frame(&mut stage.scene, 1);

    let portal_id = harness.engine.portals().portal_of(&visible).unwrap();
    assert_eq!(
        harness.engine.portals().get(&portal_id).unwrap().show_as,
        ShowAs::Property
    );
    assert_field_eq!(stage.scene, stage.cube, "Visible", bool_value(false));
}

#[test]
fn values_for_unknown_pins_are_dropped() {
    let (mut stage, mut harness) = with_cube_selected();
    let stranger = Uuid::new_v4();

    harness.push_value(&mut stage.scene, stranger, vec![1], 1);
    harness.engine.begin_frame(&mut stage.scene, 1);

    assert!(harness.engine.inputs().pending_pins().unwrap().is_empty());
    assert!(harness.engine.portals().is_empty());
}

#[test]
fn output_portals_ignore_remote_values() {
    let (mut stage, mut harness) = with_cube_selected();
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    show_as(&mut harness, &mut stage, scale, ShowAs::OutputPin);
    let portal_id = harness.engine.portals().portal_of(&scale).unwrap();

    for frame in 1..=20 {
        harness.push_value(&mut stage.scene, portal_id, vec3(3.0, 3.0, 3.0), frame);
        harness.push_value(&mut stage.scene, scale, vec3(3.0, 3.0, 3.0), frame);
        harness.engine.begin_frame(&mut stage.scene, frame);
    }

    assert_field_eq!(stage.scene, stage.cube, "Scale", vec3(1.0, 1.0, 1.0));
    // ignored values are still drained every frame
    assert_eq!(harness.engine.inputs().len(&portal_id).unwrap(), 0);
    assert_eq!(harness.engine.inputs().len(&scale).unwrap(), 0);
    assert_eq!(harness.engine.portals().len(), 1);
}

#[test]
fn deleting_the_entity_deletes_its_portals() {
    let (mut stage, mut harness) = with_cube_selected();
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    show_as(&mut harness, &mut stage, scale, ShowAs::InputPin);
    let portal_id = harness.engine.portals().portal_of(&scale).unwrap();
    harness.transport.clear();

    harness.send(
        &mut stage.scene,
        InboundEvent::ContextMenuCommand(ContextMenuAction {
            item_id: stage.cube_guid,
            command: 0,
        }),
    );

    assert!(stage.scene.object(stage.cube).is_none());
    assert!(harness.engine.portals().is_empty());
    assert!(!harness.engine.properties().contains(&scale));
    assert!(!harness.engine.tree().contains(&stage.cube_guid));
    assert_eq!(harness.transport.deleted_pins(), vec![portal_id]);
    assert_eq!(harness.transport.deleted_nodes(), vec![stage.cube_guid]);
}

#[test]
fn entity_destroyed_in_the_scene_takes_its_portals_along() {
    let (mut stage, mut harness) = with_cube_selected();
    let roughness = harness
        .engine
        .properties()
        .find("Roughness", &scenebridge_shared::Container::Object(stage.mesh))
        .unwrap();
    show_as(&mut harness, &mut stage, roughness, ShowAs::InputPin);
    let portal_id = harness.engine.portals().portal_of(&roughness).unwrap();
    harness.transport.clear();

    stage.scene.remove(stage.cube);
    harness.engine.on_actor_destroyed(stage.cube);

    assert!(!harness.engine.portals().contains(&portal_id));
    assert_eq!(harness.transport.deleted_pins(), vec![portal_id]);
}

#[test]
fn context_menus_depend_on_the_item() {
    let (mut stage, mut harness) = with_cube_selected();
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    show_as(&mut harness, &mut stage, scale, ShowAs::InputPin);
    let portal_id = harness.engine.portals().portal_of(&scale).unwrap();
    harness.transport.clear();

    for item_id in [stage.cube_guid, portal_id, Uuid::new_v4()] {
        harness.send(
            &mut stage.scene,
            InboundEvent::ContextMenuRequested(ContextMenuRequest {
                item_id,
                position: (10.0, 20.0),
                instigator: 7,
            }),
        );
    }

    let menus = harness.transport.context_menus();
    assert_eq!(menus.len(), 2);
    assert_eq!(menus[0].item_id, stage.cube_guid);
    assert_eq!(menus[0].items[0].display_name, ACTOR_MENU[0]);
    assert_eq!(menus[0].instigator, 7);
    assert_eq!(menus[1].item_id, portal_id);
    assert_eq!(menus[1].items[0].display_name, PORTAL_MENU[0]);
}

#[test]
fn deleting_a_bookmark_removes_only_the_portal() {
    let (mut stage, mut harness) = with_cube_selected();
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    show_as(&mut harness, &mut stage, scale, ShowAs::InputPin);
    let portal_id = harness.engine.portals().portal_of(&scale).unwrap();
    harness.push_value(&mut stage.scene, portal_id, vec3(2.0, 2.0, 2.0), 1);
    harness.transport.clear();

    // out-of-range commands are ignored
    harness.send(
        &mut stage.scene,
        InboundEvent::ContextMenuCommand(ContextMenuAction {
            item_id: portal_id,
            command: 5,
        }),
    );
    assert!(harness.engine.portals().contains(&portal_id));

    harness.send(
        &mut stage.scene,
        InboundEvent::ContextMenuCommand(ContextMenuAction {
            item_id: portal_id,
            command: 0,
        }),
    );

    assert!(!harness.engine.portals().contains(&portal_id));
    assert!(harness.engine.properties().contains(&scale));
    assert_eq!(harness.engine.inputs().len(&portal_id).unwrap(), 0);
    assert_eq!(harness.transport.deleted_pins(), vec![portal_id]);
    assert!(harness.transport.deleted_nodes().is_empty());
}
