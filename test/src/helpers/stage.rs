use uuid::Uuid;

use scenebridge_shared::{
    constants::{FIELD_EDIT_CONDITION, FIELD_UI_MAX, FIELD_UI_MIN},
    FieldDescriptor, FieldFlags, FieldKind, FunctionDescriptor, ObjectKey, ObjectKind,
    ParameterBlock,
};

use crate::{
    helpers::values::{bool_value, float, int32, vec3, vec4f},
    test_scene::{SpawnTemplate, TestScene},
};

pub const ANCHOR_TAG: &str = "RealityParentTransform";
pub const CUBE_TAG: &str = "Cube";
pub const HUD_WIDGET: &str = "Hud";

/// A small, known scene: a cube with a mesh component inside the `Props`
/// folder and a light at the top level. The light references a render
/// target and an overlay widget.
pub struct Stage {
    pub scene: TestScene,
    pub cube: ObjectKey,
    pub cube_guid: Uuid,
    pub mesh: ObjectKey,
    pub light: ObjectKey,
    pub light_guid: Uuid,
    pub render_target: ObjectKey,
    pub overlay: ObjectKey,
}

impl Stage {
    pub fn new() -> Self {
        Self::with_guids(Uuid::new_v4(), Uuid::new_v4(), 1)
    }

    /// Same layout, same guids, but every handle is new
    pub fn rebuilt(&self, key_offset: u64) -> Stage {
        Self::with_guids(self.cube_guid, self.light_guid, key_offset)
    }

    /// The same stage after the cube was deleted for good
    pub fn rebuilt_without_cube(&self, key_offset: u64) -> TestScene {
        let mut scene = TestScene::with_key_offset(key_offset);
        add_light(&mut scene, self.light_guid);
        register_spawnables(&mut scene);
        scene
    }

    pub fn with_guids(cube_guid: Uuid, light_guid: Uuid, key_offset: u64) -> Stage {
        let mut scene = TestScene::with_key_offset(key_offset);
        let (cube, mesh) = add_cube(&mut scene, cube_guid);
        let (light, render_target, overlay) = add_light(&mut scene, light_guid);
        register_spawnables(&mut scene);
        Stage {
            scene,
            cube,
            cube_guid,
            mesh,
            light,
            light_guid,
            render_target,
            overlay,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

fn add_cube(scene: &mut TestScene, guid: Uuid) -> (ObjectKey, ObjectKey) {
    let cube = scene.add_actor_with_guid("Cube", "StaticMeshActor", guid);
    scene.set_folder(cube, "Props");
    let mesh = scene.add_component(cube, "Mesh", "StaticMeshComponent", None);

    scene.add_field(
        cube,
        FieldDescriptor::new("Scale", "Scale", FieldKind::Vec3),
        vec3(1.0, 1.0, 1.0),
    );
    scene.add_field(
        cube,
        FieldDescriptor::new("Visible", "Visible", FieldKind::Bool),
        bool_value(true),
    );
    scene.add_field(
        cube,
        FieldDescriptor::new("Label", "Label", FieldKind::String),
        b"Cube".to_vec(),
    );
    scene.add_field(
        cube,
        FieldDescriptor::new(
            "Mode",
            "Mode",
            FieldKind::Enum {
                name: "EMode".to_string(),
                variants: vec!["Off".to_string(), "On".to_string()],
                width: 1,
            },
        ),
        vec![1],
    );
    scene.add_field(
        cube,
        FieldDescriptor::new("Lookup", "Lookup", FieldKind::Unsupported("TMap".to_string())),
        Vec::new(),
    );
    scene.add_struct_field(
        cube,
        "Settings",
        "LightSettings",
        vec![
            (
                FieldDescriptor::new("Intensity", "Intensity", FieldKind::Float)
                    .with_metadata(FIELD_UI_MIN, "0")
                    .with_metadata(FIELD_UI_MAX, "10"),
                float(1.5),
            ),
            (
                FieldDescriptor::new("Tint", "Tint", FieldKind::Vec4f),
                vec4f(1.0, 1.0, 1.0, 1.0),
            ),
        ],
    );
    scene.add_function(
        cube,
        FunctionDescriptor::new(
            "Double",
            vec![
                FieldDescriptor::new("Amount", "Amount", FieldKind::Int32),
                FieldDescriptor::new("Result", "Result", FieldKind::Int32).with_flags(FieldFlags {
                    out_param: true,
                    ..FieldFlags::editable()
                }),
            ],
        ),
        double_amount,
    );

    scene.add_field(
        mesh,
        FieldDescriptor::new("Roughness", "Roughness", FieldKind::Float),
        float(0.5),
    );
    (cube, mesh)
}

fn add_light(scene: &mut TestScene, guid: Uuid) -> (ObjectKey, ObjectKey, ObjectKey) {
    let light = scene.add_actor_with_guid("Light", "PointLight", guid);
    scene.add_component(light, "LightComponent", "PointLightComponent", None);
    scene.add_field(
        light,
        FieldDescriptor::new("Intensity", "Intensity", FieldKind::Float),
        float(10.0),
    );
    scene.add_field(
        light,
        FieldDescriptor::new("Temperature", "Temperature", FieldKind::Float).with_flags(
            FieldFlags {
                read_only: true,
                ..FieldFlags::editable()
            },
        ),
        float(6500.0),
    );
    scene.add_field(
        light,
        FieldDescriptor::new("bEnabled", "bEnabled", FieldKind::Bool),
        bool_value(true),
    );
    scene.add_field(
        light,
        FieldDescriptor::new("Radius", "Radius", FieldKind::Float)
            .with_metadata(FIELD_EDIT_CONDITION, "bEnabled"),
        float(200.0),
    );
    scene.add_field(
        light,
        FieldDescriptor::new("Falloff", "Falloff", FieldKind::Float)
            .with_metadata(FIELD_EDIT_CONDITION, "!bEnabled"),
        float(2.0),
    );

    let render_target = scene.add_object(ObjectKind::RenderTarget, "ShadowMap", "TextureRenderTarget2D");
    scene.add_object_field(light, "Output", render_target);
    let overlay = scene.add_object(ObjectKind::Widget, "Hud", "UserWidget");
    scene.add_field(
        overlay,
        FieldDescriptor::new("Opacity", "Opacity", FieldKind::Float),
        float(0.75),
    );
    scene.add_object_field(light, "Overlay", overlay);
    (light, render_target, overlay)
}

fn register_spawnables(scene: &mut TestScene) {
    scene.register_spawnable(ANCHOR_TAG, SpawnTemplate::default());
    scene.register_spawnable(
        CUBE_TAG,
        SpawnTemplate {
            class_name: "StaticMeshActor".to_string(),
            fields: vec![(
                FieldDescriptor::new("Scale", "Scale", FieldKind::Vec3),
                vec3(1.0, 1.0, 1.0),
            )],
        },
    );
    scene.register_widget(HUD_WIDGET);
}

fn double_amount(params: &mut ParameterBlock) {
    let amount = params
        .get("Amount")
        .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .map(i32::from_le_bytes)
        .unwrap_or_default();
    params.set("Result", int32(amount * 2));
}
