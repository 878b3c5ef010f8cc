use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed mapping from window pixels to framebuffer pixels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_row: Vec<usize>, // row offset into the source buffer
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_x.len(), self.src_row.len())
    }
}

/// Build a nearest-neighbour table stretching `src_w x src_h` onto
/// `dst_w x dst_h`. Hard pixel edges suit the blocky wall strips.
pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    if src_w == 0 || src_h == 0 {
        return ScaleLut::empty();
    }

    let sx = src_w as f32 / dst_w.max(1) as f32;
    let sy = src_h as f32 / dst_h.max(1) as f32;

    // Sample at the centre of each destination pixel.
    let src_x = (0..dst_w)
        .map(|x| (((x as f32 + 0.5) * sx) as usize).min(src_w - 1))
        .collect();
    let src_row = (0..dst_h)
        .map(|y| (((y as f32 + 0.5) * sy) as usize).min(src_h - 1) * src_w)
        .collect();

    ScaleLut { src_x, src_row }
}

/// Parallel nearest stretch of `src` into `dst`, one window row per task.
/// `dst` must be `lut.dst_size()` pixels.
pub fn blit_nearest_stretch(dst: &mut [u32], src: &[u32], lut: &ScaleLut) {
    let (dw, _) = lut.dst_size();
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw)
        .zip(lut.src_row.par_iter())
        .for_each(|(dst_row, &row)| {
            for (px, &x) in dst_row.iter_mut().zip(&lut.src_x) {
                *px = src[row + x];
            }
        });
}
