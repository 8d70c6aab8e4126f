//! Placement data produced by the world generator
//!
//! Everything here is plain data for the renderer. The only parts the
//! simulation reads back are the structure bounds (for hit-scan) and the
//! ring positions.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::ambient::{AtmosphereField, FloatingIsland, TrafficStream};
use crate::consts::RING_COUNT;
use crate::levels::Biome;

/// One placed object instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub scale: Vec3,
    /// Euler angles (radians, XYZ order)
    pub rotation: Vec3,
}

impl Placement {
    pub fn new(position: Vec3, scale: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix for a unit mesh
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Horizontal distance from the world origin
    pub fn radial_distance(&self) -> f32 {
        (self.position.x * self.position.x + self.position.z * self.position.z).sqrt()
    }

    /// Conservative world-space bounds of a unit box under this placement.
    ///
    /// Yaw is folded in by widening the footprint to its diagonal; any other
    /// rotation falls back to the bounding sphere.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let tilted = self.rotation.x != 0.0 || self.rotation.z != 0.0;
        let half = if tilted {
            Vec3::splat(self.scale.length() * 0.5)
        } else {
            let r = 0.5 * (self.scale.x * self.scale.x + self.scale.z * self.scale.z).sqrt();
            Vec3::new(r, self.scale.y * 0.5, r)
        };
        (self.position - half, self.position + half)
    }
}

/// Size class of a procedurally placed structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureClass {
    /// Tall urban tower
    Tower,
    /// Mid-rise block
    Block,
    /// Low connector
    Connector,
    /// Single class used by every non-urban biome
    Nature,
}

/// Structures grouped by class, one instanced draw per list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Structures {
    pub towers: Vec<Placement>,
    pub blocks: Vec<Placement>,
    pub connectors: Vec<Placement>,
    pub nature: Vec<Placement>,
}

impl Structures {
    pub fn push(&mut self, class: StructureClass, placement: Placement) {
        self.list_mut(class).push(placement);
    }

    pub fn list(&self, class: StructureClass) -> &[Placement] {
        match class {
            StructureClass::Tower => &self.towers,
            StructureClass::Block => &self.blocks,
            StructureClass::Connector => &self.connectors,
            StructureClass::Nature => &self.nature,
        }
    }

    fn list_mut(&mut self, class: StructureClass) -> &mut Vec<Placement> {
        match class {
            StructureClass::Tower => &mut self.towers,
            StructureClass::Block => &mut self.blocks,
            StructureClass::Connector => &mut self.connectors,
            StructureClass::Nature => &mut self.nature,
        }
    }

    pub fn len(&self) -> usize {
        self.towers.len() + self.blocks.len() + self.connectors.len() + self.nature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.towers
            .iter()
            .chain(&self.blocks)
            .chain(&self.connectors)
            .chain(&self.nature)
    }
}

/// Complete generated world for one level entry
#[derive(Debug, Clone)]
pub struct WorldLayout {
    pub level_id: u32,
    pub biome: Biome,
    /// Scan mode renders structures as wireframe; placement is unaffected
    pub wireframe: bool,
    pub structures: Structures,
    pub islands: Vec<FloatingIsland>,
    pub atmosphere: AtmosphereField,
    pub traffic: Vec<TrafficStream>,
    pub mega_structures: Vec<Placement>,
    pub ancient_machines: Vec<Placement>,
    /// Checkpoint ring centres (already scaled by ring complexity)
    pub rings: [Vec3; RING_COUNT],
}

impl WorldLayout {
    /// Animate the moving parts of the world (particles, traffic)
    pub fn advance(&mut self, dt: f32) {
        self.atmosphere.advance(dt);
        for stream in &mut self.traffic {
            stream.advance(dt);
        }
    }

    /// Bounds of every solid structure a shot can hit
    pub fn solid_bounds(&self) -> Vec<(Vec3, Vec3)> {
        self.structures
            .iter()
            .chain(&self.mega_structures)
            .map(Placement::bounds)
            .collect()
    }
}
