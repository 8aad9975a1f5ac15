//! Uniform Tweens
//!
//! Short linear ramps that drive a material's hover or activation uniform
//! toward a target over a fixed duration. Ramps are scheduled from event
//! handlers or public API calls and interpolated by the frame loop; nothing
//! awaits them; each frame simply writes the current interpolated value.

use crate::assets::{Assets, MaterialKey};
use crate::resources::{Material, UniformChannel};

#[derive(Debug, Clone)]
struct UniformTween {
    material: MaterialKey,
    channel: UniformChannel,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

/// The set of in-flight uniform ramps.
#[derive(Default)]
pub struct TweenSystem {
    tweens: Vec<UniformTween>,
}

impl TweenSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ramps `channel` of `material` from its current value to `to` over
    /// `duration` clock units.
    ///
    /// Restarting a ramp on the same channel discards the old one; the two
    /// never blend. A missing material is a silent no-op. A non-positive
    /// duration applies the target immediately.
    pub fn drive(
        &mut self,
        assets: &mut Assets,
        material: MaterialKey,
        channel: UniformChannel,
        to: f32,
        duration: f32,
    ) {
        let Some(image) = assets.get_material_mut(material).and_then(Material::as_image_mut) else {
            log::debug!("tween target material is gone, skipping");
            return;
        };

        self.tweens.retain(|t| !(t.material == material && t.channel == channel));

        if duration <= 0.0 {
            image.set_channel(channel, to);
            return;
        }

        let from = image.channel(channel);
        self.tweens.push(UniformTween {
            material,
            channel,
            from,
            to,
            duration,
            elapsed: 0.0,
        });
    }

    /// Advances every ramp by `dt` clock units and writes the interpolated
    /// values. Finished ramps (and ramps whose material was released
    /// mid-flight) are dropped.
    pub fn update(&mut self, dt: f32, assets: &mut Assets) {
        self.tweens.retain_mut(|tween| {
            tween.elapsed += dt;
            let t = (tween.elapsed / tween.duration).clamp(0.0, 1.0);
            let value = tween.from + (tween.to - tween.from) * t;

            match assets.get_material_mut(tween.material).and_then(Material::as_image_mut) {
                Some(image) => image.set_channel(tween.channel, value),
                None => return false,
            }

            t < 1.0
        });
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }
}
