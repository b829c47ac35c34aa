/// Target box and filename prefix for a finalized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageGeometry {
    pub width: u32,
    pub height: u32,
    /// Leading segment of the final filename, e.g. `client` in `client-{token}.jpg`.
    pub prefix: &'static str,
}

impl ImageGeometry {
    /// Client testimonial photos.
    pub const CLIENT: ImageGeometry = ImageGeometry {
        width: 300,
        height: 300,
        prefix: "client",
    };

    /// Project portfolio photos.
    pub const PROJECT: ImageGeometry = ImageGeometry {
        width: 450,
        height: 350,
        prefix: "project",
    };
}
