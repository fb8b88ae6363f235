/// Geometric and photometric parameters for one frame.
///
/// Recomputed from scratch every frame by a program's state function; nothing here is carried
/// between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    /// Eased phase progress the parameters were derived from.
    pub eased: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in degrees, counter-clockwise positive.
    pub angle_deg: f64,
    /// Pixel translation applied on top of the program's anchor position.
    pub offset: (i32, i32),
    /// Opacity of the composited layer, always within `[0, 1]`.
    pub alpha: f64,
    /// Odd Gaussian kernel size, if the frame is blurred.
    pub blur_kernel: Option<u32>,
    /// Fraction of the centred reveal window that is open, if the frame is masked.
    pub reveal: Option<f64>,
    /// Whether the program's main layer is drawn at all this frame.
    pub visible: bool,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            eased: 0.0,
            scale: 1.0,
            angle_deg: 0.0,
            offset: (0, 0),
            alpha: 1.0,
            blur_kernel: None,
            reveal: None,
            visible: true,
        }
    }
}

impl FrameState {
    /// State that draws nothing over the background.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }
}
