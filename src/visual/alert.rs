//! Alert feedback: a material and spotlight pair that flips between a calm
//! and an alerted look.

use glam::Vec3;

use super::{Material, SpotLight};
use crate::assets::AssetHandle;

/// Visual state of an entity that can be alerted.
///
/// The calm look is captured at construction, so standing down restores
/// exactly what the entity started with.
#[derive(Debug, Clone)]
pub struct AlertVisual {
    /// Material currently applied
    pub material: AssetHandle<Material>,
    /// Attached spotlight
    pub light: SpotLight,
    calm_material: AssetHandle<Material>,
    calm_light_color: Vec3,
    alert_material: AssetHandle<Material>,
    alert_light_color: Vec3,
}

impl AlertVisual {
    #[must_use]
    pub fn new(
        material: AssetHandle<Material>,
        light: SpotLight,
        alert_material: AssetHandle<Material>,
        alert_light_color: Vec3,
    ) -> Self {
        Self {
            calm_material: material.clone(),
            calm_light_color: light.color,
            material,
            light,
            alert_material,
            alert_light_color,
        }
    }

    /// Swap to the alert material and light colour.
    pub fn raise_alert(&mut self) {
        self.material = self.alert_material.clone();
        self.light.color = self.alert_light_color;
    }

    /// Restore the calm look.
    pub fn stand_down(&mut self) {
        self.material = self.calm_material.clone();
        self.light.color = self.calm_light_color;
    }

    #[must_use]
    pub fn is_alerted(&self) -> bool {
        self.material == self.alert_material && self.material != self.calm_material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::ALERT_RED;

    fn visual() -> AlertVisual {
        AlertVisual::new(
            AssetHandle::new(Material::guard()),
            SpotLight::default(),
            AssetHandle::new(Material::alert()),
            ALERT_RED,
        )
    }

    #[test]
    fn test_alert_swaps_handles_and_light() {
        let mut v = visual();
        let calm = v.material.clone();

        v.raise_alert();
        assert!(v.is_alerted());
        assert_ne!(v.material, calm);
        assert_eq!(v.light.color, ALERT_RED);

        v.stand_down();
        assert!(!v.is_alerted());
        assert_eq!(v.material, calm);
        assert_eq!(v.light.color, SpotLight::default().color);
    }

    #[test]
    fn test_alert_does_not_copy_material() {
        let mut v = visual();
        v.raise_alert();
        // the stored alert handle plus the applied one
        assert_eq!(v.material.strong_count(), 2);
    }
}
