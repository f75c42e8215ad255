//! Scene Assembly
//!
//! Turns generator output into scene-graph nodes: one group per island and
//! per structure, a point-light rig and a camera node. Generators stay
//! declarative; only this module touches the shared scene.

use glam::Vec3;

use crate::camera::ViewCamera;
use crate::game::building::{DnaRecord, oriented_mesh};
use crate::game::terrain::TerrainLayer;
use crate::game::types::{HexColor, Material, Mesh};
use crate::scene::{NodeId, PointLight, SceneGraph};

/// Reference distance for light intensities; rigs placed this far out get no light.
const LIGHT_REFERENCE_DISTANCE: f32 = 12.0;
const LIGHT_INTENSITY_SCALE: f32 = 0.05;

/// Geometry, material and placement of one block.
#[derive(Clone, Debug, PartialEq)]
pub struct RealizedBlock {
    pub mesh: Mesh,
    pub material: Material,
    pub translation: Vec3,
}

/// Instantiate one DNA record. Depends on nothing but the record.
pub fn realize_block(record: &DnaRecord) -> RealizedBlock {
    let material = Material::self_lit(
        record.color().to_linear(),
        record.emissive_intensity(),
        record.roughness(),
        record.metalness(),
    );
    RealizedBlock {
        mesh: oriented_mesh(record.shape(), record.rotation()),
        material,
        translation: record.position(),
    }
}

/// Place the camera behind and above an object of the given radius and
/// height, looking at the origin.
pub fn place_camera(camera: &mut ViewCamera, radius: f32, height: f32) {
    camera.position = Vec3::new(0.0, 4.0 + height / 12.0, 8.0 + radius);
    camera.look_at(Vec3::ZERO);
}

/// Inserts generated content under the scene root.
pub struct SceneAssembler<'a> {
    scene: &'a mut SceneGraph,
}

impl<'a> SceneAssembler<'a> {
    pub fn new(scene: &'a mut SceneGraph) -> Self {
        Self { scene }
    }

    /// Add one mesh node per terrain layer under a new "island" root.
    pub fn assemble_island(&mut self, layers: &[TerrainLayer]) -> NodeId {
        let root = self.scene.add_group("island");
        for layer in layers {
            let material = Material::standard(layer.color.to_linear());
            let node = self.scene.add_mesh(layer.kind.name(), layer.mesh(), material);
            self.scene.attach(root, node);
        }
        let scene_root = self.scene.root();
        self.scene.attach(scene_root, root);
        root
    }

    /// Rebuild a structure from its records under a new "structure" root.
    ///
    /// Children follow record order, placeholders included, so child `i`
    /// always belongs to record `i`.
    pub fn build_structure(&mut self, records: &[DnaRecord], offset: Vec3) -> NodeId {
        let root = self.scene.add_group("structure");
        for (i, record) in records.iter().enumerate() {
            let block = realize_block(record);
            let node = self
                .scene
                .add_mesh(&format!("block_{i}"), block.mesh, block.material);
            self.scene.set_translation(node, block.translation + offset);
            self.scene.attach(root, node);
        }
        let scene_root = self.scene.root();
        self.scene.attach(scene_root, root);
        root
    }

    /// Four corner lights plus one overhead light around an object of the
    /// given radius and height.
    pub fn add_lights(&mut self, color: HexColor, radius: f32, height: f32) -> NodeId {
        let color = color.to_linear();
        let rig = self.scene.add_group("lights");

        let corner = PointLight {
            color,
            intensity: LIGHT_INTENSITY_SCALE * (LIGHT_REFERENCE_DISTANCE - radius).abs(),
        };
        let (x, y, z) = (1.0 + radius, 1.0 + height / 2.0, 1.0 + radius);
        let corners = [
            Vec3::new(x, y, z),
            Vec3::new(-x, y, -z),
            Vec3::new(x, y, -z),
            Vec3::new(-x, y, z),
        ];
        for (i, position) in corners.into_iter().enumerate() {
            let light = self.scene.add_point_light(&format!("corner_light_{i}"), corner);
            self.scene.set_translation(light, position);
            self.scene.attach(rig, light);
        }

        let top = self.scene.add_point_light(
            "top_light",
            PointLight {
                color,
                intensity: LIGHT_INTENSITY_SCALE * (LIGHT_REFERENCE_DISTANCE - height).abs(),
            },
        );
        self.scene.set_translation(top, Vec3::new(0.0, 2.0 + height, 0.0));
        self.scene.attach(rig, top);

        let scene_root = self.scene.root();
        self.scene.attach(scene_root, rig);
        rig
    }

    /// Add a camera node mirroring `camera`'s pose.
    pub fn add_camera(&mut self, camera: &ViewCamera) -> NodeId {
        let node = self.scene.add_camera("camera");
        self.scene.node_mut(node).transform.translation = camera.position;
        self.scene.node_mut(node).transform.rotation = camera.rotation;
        let scene_root = self.scene.root();
        self.scene.attach(scene_root, node);
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    fn record(type_code: i32, position: Vec3) -> DnaRecord {
        DnaRecord::new(position, type_code, 2, HexColor::new(255, 0, 0), 0.5, 0.4, 0.3)
    }

    #[test]
    fn test_realize_block_uses_record_material() {
        let block = realize_block(&record(0, Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(block.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(block.material.color, [1.0, 0.0, 0.0]);
        assert_eq!(block.material.emissive, block.material.color);
        assert_eq!(block.material.emissive_intensity, 0.5);
        assert_eq!(block.material.roughness, 0.4);
        assert_eq!(block.material.metalness, 0.3);
        assert_eq!(block.mesh.triangle_count(), 12);
    }

    #[test]
    fn test_realize_block_is_pure() {
        let r = record(4, Vec3::X);
        assert_eq!(realize_block(&r), realize_block(&r));
    }

    #[test]
    fn test_unknown_type_realizes_empty_mesh() {
        let block = realize_block(&record(99, Vec3::Y));
        assert!(block.mesh.is_empty());
        assert_eq!(block.translation, Vec3::Y);
        assert_eq!(block.material.roughness, 0.4);
    }

    #[test]
    fn test_structure_children_follow_records() {
        let mut scene = SceneGraph::new();
        let records = [record(0, Vec3::ZERO), record(42, Vec3::Y), record(1, Vec3::Z)];
        let root = SceneAssembler::new(&mut scene).build_structure(&records, Vec3::new(-1.0, 0.0, 0.0));
        let children = scene.children(root).to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(scene.node(children[1]).transform.translation, Vec3::new(-1.0, 1.0, 0.0));
        match &scene.node(children[1]).kind {
            NodeKind::Mesh { mesh, .. } => assert!(scene.mesh(*mesh).is_empty()),
            other => panic!("expected mesh node, got {other:?}"),
        }
        assert!(scene.is_attached(root));
    }

    #[test]
    fn test_light_rig() {
        let mut scene = SceneGraph::new();
        let rig = SceneAssembler::new(&mut scene).add_lights(HexColor::new(255, 255, 255), 14.4, 2.0);
        let lights = scene.children(rig).to_vec();
        assert_eq!(lights.len(), 5);

        let first = scene.node(lights[0]);
        assert!(first.transform.translation.distance(Vec3::new(15.4, 2.0, 15.4)) < 1e-5);
        match first.kind {
            NodeKind::PointLight(light) => assert!((light.intensity - 0.12).abs() < 1e-5),
            _ => panic!("expected light"),
        }

        let top = scene.node(lights[4]);
        assert_eq!(top.transform.translation, Vec3::new(0.0, 4.0, 0.0));
        match top.kind {
            NodeKind::PointLight(light) => assert!((light.intensity - 0.5).abs() < 1e-5),
            _ => panic!("expected light"),
        }
    }

    #[test]
    fn test_place_camera() {
        let mut camera = ViewCamera::default();
        place_camera(&mut camera, 18.0, 24.0);
        assert_eq!(camera.position, Vec3::new(0.0, 6.0, 26.0));
        let to_origin = (-camera.position).normalize();
        assert!(camera.forward().distance(to_origin) < 1e-4);
    }
}
