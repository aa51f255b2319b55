/// Property proxies built by populating mirrored nodes, and the values
/// they carry in both directions

use scenebridge_client::{
    shared::{
        constants::{META_EDIT_CONDITION_PROPERTY_ID, TYPE_VOID},
        Container, PinContents, ShowAs,
    },
    InboundEvent,
};
use scenebridge_shared::CanShowAs;
use scenebridge_test::{assert_field_eq, float, vec3, vec4f, wire_string, Harness, Stage};

#[test]
fn selecting_an_actor_populates_it_and_its_components() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);

    harness.select(&mut stage.scene, stage.cube_guid);

    for field in ["Scale", "Visible", "Label", "Mode", "Settings"] {
        assert!(
            harness.property_id(stage.cube, field).is_some(),
            "{} should have a proxy",
            field
        );
    }
    let roughness = harness
        .engine
        .properties()
        .find("Roughness", &Container::Object(stage.mesh));
    assert!(roughness.is_some(), "component fields are populated too");

    let cube_updates = harness.transport.node_updates_for(&stage.cube_guid);
    assert_eq!(cube_updates.len(), 1);
    let pin_names: Vec<&str> = cube_updates[0]
        .pins_to_add
        .iter()
        .map(|pin| pin.display_name.as_str())
        .collect();
    assert!(pin_names.contains(&"Scale"));
    assert!(pin_names.contains(&"Mode"));
    assert_eq!(cube_updates[0].functions_to_add.len(), 1);
    assert_eq!(cube_updates[0].functions_to_add[0].name, "Double");
    assert_eq!(cube_updates[0].nodes_to_add[0].name, "Mesh");
}

#[test]
fn unsupported_fields_get_no_proxy() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.cube_guid);

    assert_eq!(harness.property_id(stage.cube, "Lookup"), None);
    let cube_updates = harness.transport.node_updates_for(&stage.cube_guid);
    assert!(cube_updates[0]
        .pins_to_add
        .iter()
        .all(|pin| pin.display_name != "Lookup"));
}

#[test]
fn pin_payloads_use_wire_encoding() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.cube_guid);
    let properties = harness.engine.properties();

    let label = harness.property_id(stage.cube, "Label").unwrap();
    assert_eq!(properties.get(&label).unwrap().data(), wire_string("Cube").as_slice());

    let mode = harness.property_id(stage.cube, "Mode").unwrap();
    let mode = properties.get(&mode).unwrap();
    assert_eq!(mode.data(), wire_string("On").as_slice());
    assert_eq!(
        mode.serialize().visualizer.map(|visualizer| visualizer.name),
        Some("EMode".to_string())
    );

    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    let scale = properties.get(&scale).unwrap().serialize();
    assert_eq!(scale.data, vec3(1.0, 1.0, 1.0));
    assert_eq!(scale.default_value, vec3(1.0, 1.0, 1.0));
    assert_eq!(scale.contents, PinContents::Job);
}

#[test]
fn struct_members_are_flattened_under_a_void_parent() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.cube_guid);
    let properties = harness.engine.properties();

    let settings = harness.property_id(stage.cube, "Settings").unwrap();
    let settings = properties.get(&settings).unwrap();
    assert_eq!(settings.type_name(), TYPE_VOID);
    assert_eq!(settings.can_show_as(), CanShowAs::PropertyOnly);
    assert_eq!(settings.children().len(), 2);

    let nested = Container::Struct {
        owner: stage.cube,
        path: vec!["Settings".to_string()],
    };
    let intensity = properties.find("Intensity", &nested).unwrap();
    let intensity = properties.get(&intensity).unwrap();
    assert_eq!(intensity.data(), float(1.5).as_slice());
    assert_eq!(intensity.min(), float(0.0).as_slice());
    assert_eq!(intensity.max(), float(10.0).as_slice());
    assert_eq!(intensity.display_name, "Settings_Intensity");
    assert_eq!(intensity.metadata("ContainerPath"), Some("Settings"));

    let tint = properties.find("Tint", &nested).unwrap();
    assert_eq!(
        properties.get(&tint).unwrap().data(),
        vec4f(1.0, 1.0, 1.0, 1.0).as_slice()
    );
}

#[test]
fn read_only_fields_can_only_be_outputs() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.light_guid);

    let temperature = harness.property_id(stage.light, "Temperature").unwrap();
    let temperature = harness.engine.properties().get(&temperature).unwrap();
    assert!(temperature.is_read_only());
    assert_eq!(temperature.can_show_as(), CanShowAs::OutputPinOrProperty);
    assert_eq!(temperature.show_as, ShowAs::Property);
}

#[test]
fn scene_edits_are_pushed_to_the_remote_side() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.cube_guid);
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    harness.transport.clear();

    let container = Container::Object(stage.cube);
    stage.scene.set_value(&container, "Scale", vec3(4.0, 4.0, 4.0));
    harness
        .engine
        .on_property_changed(&stage.scene, &container, "Scale");

    assert_eq!(
        harness.transport.value_changes(),
        vec![(scale, vec3(4.0, 4.0, 4.0))]
    );
    let cached = harness.engine.properties().get(&scale).unwrap().data().to_vec();
    assert_eq!(cached, vec3(4.0, 4.0, 4.0));
}

#[test]
fn remote_strings_and_enums_are_converted_to_storage() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.cube_guid);
    let label = harness.property_id(stage.cube, "Label").unwrap();
    let mode = harness.property_id(stage.cube, "Mode").unwrap();

    harness.push_value(&mut stage.scene, label, wire_string("Sphere"), 1);
    harness.push_value(&mut stage.scene, mode, wire_string("Off"), 1);
    harness.engine.begin_frame(&mut stage.scene, 1);

    assert_field_eq!(stage.scene, stage.cube, "Label", b"Sphere".to_vec());
    assert_field_eq!(stage.scene, stage.cube, "Mode", vec![0u8]);
    assert!(stage.scene.dirty_objects().contains(&stage.cube));
}

#[test]
fn mis_sized_payloads_leave_the_field_untouched() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.cube_guid);
    let scale = harness.property_id(stage.cube, "Scale").unwrap();
    let mode = harness.property_id(stage.cube, "Mode").unwrap();

    harness.push_value(&mut stage.scene, scale, vec![1, 2, 3], 1);
    harness.push_value(&mut stage.scene, mode, wire_string("Sideways"), 1);
    harness.engine.begin_frame(&mut stage.scene, 1);

    assert_field_eq!(stage.scene, stage.cube, "Scale", vec3(1.0, 1.0, 1.0));
    assert_field_eq!(stage.scene, stage.cube, "Mode", vec![1u8]);
    assert!(stage.scene.dirty_objects().is_empty());
}

#[test]
fn loading_a_path_populates_every_segment() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);

    harness.send(
        &mut stage.scene,
        InboundEvent::LoadNodesOnPaths {
            paths: vec!["Props/Cube".to_string()],
        },
    );

    assert!(harness.property_id(stage.cube, "Scale").is_some());
    assert_eq!(harness.property_id(stage.light, "Intensity"), None);
    let cube = harness.engine.tree().get_node(&stage.cube_guid).unwrap();
    assert!(!cube.needs_reload);
}

#[test]
fn edit_conditions_point_at_the_controlling_sibling() {
    let mut stage = Stage::new();
    let mut harness = Harness::connected(&mut stage.scene);
    harness.select(&mut stage.scene, stage.light_guid);

    let enabled = harness.property_id(stage.light, "bEnabled").unwrap().to_string();
    let properties = harness.engine.properties();
    for field in ["Radius", "Falloff"] {
        let id = harness.property_id(stage.light, field).unwrap();
        assert_eq!(
            properties.get(&id).unwrap().metadata(META_EDIT_CONDITION_PROPERTY_ID),
            Some(enabled.as_str()),
            "{} is controlled by bEnabled",
            field
        );
    }
    let intensity = harness.property_id(stage.light, "Intensity").unwrap();
    assert_eq!(
        properties.get(&intensity).unwrap().metadata(META_EDIT_CONDITION_PROPERTY_ID),
        None
    );

    // the link travels with the published pin
    let radius = harness.property_id(stage.light, "Radius").unwrap();
    let light_updates = harness.transport.node_updates_for(&stage.light_guid);
    let pin = light_updates[0]
        .pins_to_add
        .iter()
        .find(|pin| pin.id == radius)
        .unwrap();
    assert_eq!(pin.metadata(META_EDIT_CONDITION_PROPERTY_ID), Some(enabled.as_str()));
}
