//! Scene Graph
//!
//! Arena of transform nodes. Group, mesh, light and camera nodes hang off a
//! single root; a node only renders while it is attached under the root.

use glam::{Mat4, Quat, Vec3};

use super::mesh::{Material, Mesh};

/// Handle to a node in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Handle to geometry stored in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(usize);

impl MeshId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local translation / rotation / scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Point light emitting equally in all directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Linear RGB
    pub color: [f32; 3],
    pub intensity: f32,
}

/// What a node carries besides its transform.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh { mesh: MeshId, material: Material },
    PointLight(PointLight),
    Camera,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Shared scene: node arena plus geometry storage.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    meshes: Vec<Mesh>,
    /// Bumped by [`SceneGraph::clear`] so GPU caches keyed by `MeshId` can be dropped
    epoch: u64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: String::from("scene"),
                transform: Transform::default(),
                kind: NodeKind::Group,
                parent: None,
                children: Vec::new(),
            }],
            meshes: Vec::new(),
            epoch: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of nodes including the root and detached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Drop every node and mesh, keeping an empty root.
    pub fn clear(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self::new();
        self.epoch = epoch;
    }

    fn push(&mut self, name: &str, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            transform: Transform::default(),
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached group node.
    pub fn add_group(&mut self, name: &str) -> NodeId {
        self.push(name, NodeKind::Group)
    }

    /// Store `mesh` and create a detached node drawing it with `material`.
    pub fn add_mesh(&mut self, name: &str, mesh: Mesh, material: Material) -> NodeId {
        let mesh_id = MeshId(self.meshes.len());
        self.meshes.push(mesh);
        self.push(
            name,
            NodeKind::Mesh {
                mesh: mesh_id,
                material,
            },
        )
    }

    pub fn add_point_light(&mut self, name: &str, light: PointLight) -> NodeId {
        self.push(name, NodeKind::PointLight(light))
    }

    pub fn add_camera(&mut self, name: &str) -> NodeId {
        self.push(name, NodeKind::Camera)
    }

    /// Attach `child` under `parent`, detaching it from any previous parent.
    ///
    /// Returns `false` (and changes nothing) when the link would form a cycle.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> bool {
        if child == self.root() || self.is_ancestor(child, parent) {
            return false;
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        true
    }

    /// Remove `child` from its parent; the node itself stays in the arena.
    pub fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != child);
        }
    }

    /// `true` when `ancestor` is `node` or lies on its parent chain.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    /// `true` when the node hangs (transitively) under the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_ancestor(self.root(), id)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn mesh(&self, id: MeshId) -> &Mesh {
        &self.meshes[id.0]
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn set_translation(&mut self, id: NodeId, translation: Vec3) {
        self.nodes[id.0].transform.translation = translation;
    }

    /// Rotate a node about an axis given in world space.
    ///
    /// Assumes the node's parents carry no rotation, which holds for roots
    /// attached straight under the scene.
    pub fn rotate_on_world_axis(&mut self, id: NodeId, axis: Vec3, angle: f32) {
        let transform = &mut self.nodes[id.0].transform;
        transform.rotation = (Quat::from_axis_angle(axis.normalize(), angle) * transform.rotation).normalize();
    }

    /// Local-to-world matrix of a node.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// Depth-first walk of every node attached under the root.
    pub fn visit(&self, mut f: impl FnMut(NodeId, &Node, Mat4)) {
        let mut stack = vec![(self.root(), Mat4::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let node = &self.nodes[id.0];
            let world = parent_world * node.transform.matrix();
            f(id, node, world);
            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }
    }

    /// Number of nodes reachable from the root, root included.
    pub fn attached_count(&self) -> usize {
        let mut count = 0;
        self.visit(|_, _, _| count += 1);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_and_world_matrix() {
        let mut scene = SceneGraph::new();
        let group = scene.add_group("island");
        let mesh = scene.add_mesh("block", Mesh::new(), Material::default());
        scene.set_translation(group, Vec3::new(1.0, 0.0, 0.0));
        scene.set_translation(mesh, Vec3::new(0.0, 2.0, 0.0));
        assert!(scene.attach(scene.root(), group));
        assert!(scene.attach(group, mesh));

        let world = scene.world_matrix(mesh);
        assert_eq!(world.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 0.0));
        assert!(scene.is_attached(mesh));
        assert_eq!(scene.attached_count(), 3);
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut scene = SceneGraph::new();
        let a = scene.add_group("a");
        let b = scene.add_group("b");
        assert!(scene.attach(a, b));
        assert!(!scene.attach(b, a));
        assert!(!scene.attach(a, a));
        assert!(!scene.attach(a, scene.root()));
    }

    #[test]
    fn test_reattach_moves_child() {
        let mut scene = SceneGraph::new();
        let a = scene.add_group("a");
        let b = scene.add_group("b");
        let c = scene.add_group("c");
        scene.attach(a, c);
        scene.attach(b, c);
        assert!(scene.children(a).is_empty());
        assert_eq!(scene.children(b), &[c]);
        assert_eq!(scene.node(c).parent(), Some(b));
    }

    #[test]
    fn test_detach_hides_subtree() {
        let mut scene = SceneGraph::new();
        let group = scene.add_group("g");
        scene.attach(scene.root(), group);
        scene.detach(group);
        assert!(!scene.is_attached(group));
        assert_eq!(scene.attached_count(), 1);
    }

    #[test]
    fn test_rotate_on_world_axis() {
        let mut scene = SceneGraph::new();
        let group = scene.add_group("g");
        scene.attach(scene.root(), group);
        scene.rotate_on_world_axis(group, Vec3::Y, std::f32::consts::FRAC_PI_2);
        let p = scene.world_matrix(group).transform_point3(Vec3::X);
        assert!(p.distance(Vec3::new(0.0, 0.0, -1.0)) < 1e-5);
    }

    #[test]
    fn test_clear_bumps_epoch() {
        let mut scene = SceneGraph::new();
        scene.add_mesh("m", Mesh::new(), Material::default());
        scene.clear();
        assert_eq!(scene.mesh_count(), 0);
        assert!(scene.is_empty());
        assert_eq!(scene.epoch(), 1);
    }
}
