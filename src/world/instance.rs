//! GPU instance records for placement lists
//!
//! Renderers upload these directly as per-instance vertex buffers.

use bytemuck::{Pod, Zeroable};

use super::layout::Placement;

/// Column-major model matrix for one instanced mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Placement> for InstanceRaw {
    fn from(p: &Placement) -> Self {
        Self {
            model: p.matrix().to_cols_array_2d(),
        }
    }
}

/// Convert a placement list to instance records
pub fn instances(placements: &[Placement]) -> Vec<InstanceRaw> {
    placements.iter().map(InstanceRaw::from).collect()
}

/// Slightly inflated copies of tower placements for the window-grid overlay
pub fn window_shell(placements: &[Placement]) -> Vec<InstanceRaw> {
    placements
        .iter()
        .map(|p| {
            let mut shell = *p;
            shell.scale.x *= 1.02;
            shell.scale.z *= 1.02;
            InstanceRaw::from(&shell)
        })
        .collect()
}

/// Raw bytes for buffer upload
pub fn as_bytes(instances: &[InstanceRaw]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
