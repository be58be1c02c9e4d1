use image::RgbImage;

use crate::error::*;

/// Precomputed per-channel gamma lookup: `v -> floor((v / 255)^(1 / gamma) * 255)`.
#[derive(Debug, Clone)]
pub struct GammaTable {
    gamma: f64,
    table: [u8; 256],
    identity: bool,
}

impl GammaTable {
    pub fn new(gamma: f64) -> Result<Self, Error> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(Error::Config(format!("{ERROR_GAMMA}: {gamma}")));
        }
        let inv_gamma = 1.0 / gamma;
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let corrected = (i as f64 / 255.0).powf(inv_gamma) * 255.0;
            // absorbs x.999.. products so that gamma 1.0 is the identity
            *entry = (corrected + 1e-9).floor().min(255.0) as u8;
        }
        let identity = table.iter().enumerate().all(|(i, &v)| i == v as usize);
        Ok(Self {
            gamma,
            table,
            identity,
        })
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn is_identity(&self) -> bool {
        self.identity
    }

    #[inline]
    pub fn lookup(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    pub fn apply(&self, frame: &RgbImage) -> RgbImage {
        let mut out = frame.clone();
        self.apply_mut(&mut out);
        out
    }

    pub fn apply_mut(&self, frame: &mut RgbImage) {
        if self.identity {
            return;
        }
        for channel in frame.iter_mut() {
            *channel = self.table[*channel as usize];
        }
    }
}
