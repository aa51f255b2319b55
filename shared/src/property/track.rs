/// Camera tracking sample streamed into track pins.
///
/// The live storage and the wire share one packed little-endian layout, in
/// field order.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub location: [f64; 3],
    pub rotation: [f64; 3],
    pub fov: f64,
    pub focus_distance: f64,
    pub center_shift: [f64; 2],
    pub zoom: f64,
    pub k1: f32,
    pub k2: f32,
    pub render_ratio: f64,
    pub distortion_scale: f32,
    pub sensor_size: [f64; 2],
    pub pixel_aspect_ratio: f64,
    pub nodal_offset: f64,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            location: [0.0; 3],
            rotation: [0.0; 3],
            fov: 60.0,
            focus_distance: 0.0,
            center_shift: [0.0; 2],
            zoom: 0.0,
            k1: 0.0,
            k2: 0.0,
            render_ratio: 1.0,
            distortion_scale: 1.0,
            sensor_size: [9.59, 5.394],
            pixel_aspect_ratio: 1.0,
            nodal_offset: 0.0,
        }
    }
}

impl Track {
    pub const ENCODED_LEN: usize = 16 * 8 + 3 * 4;

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::ENCODED_LEN);
        let mut put = |value: f64| out.extend_from_slice(&value.to_le_bytes());
        self.location.iter().for_each(|v| put(*v));
        self.rotation.iter().for_each(|v| put(*v));
        put(self.fov);
        put(self.focus_distance);
        self.center_shift.iter().for_each(|v| put(*v));
        put(self.zoom);
        out.extend_from_slice(&self.k1.to_le_bytes());
        out.extend_from_slice(&self.k2.to_le_bytes());
        out.extend_from_slice(&self.render_ratio.to_le_bytes());
        out.extend_from_slice(&self.distortion_scale.to_le_bytes());
        for v in self.sensor_size {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.extend_from_slice(&self.pixel_aspect_ratio.to_le_bytes());
        out.extend_from_slice(&self.nodal_offset.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::ENCODED_LEN {
            return None;
        }
        let mut reader = TrackReader { bytes, offset: 0 };
        Some(Self {
            location: [reader.f64(), reader.f64(), reader.f64()],
            rotation: [reader.f64(), reader.f64(), reader.f64()],
            fov: reader.f64(),
            focus_distance: reader.f64(),
            center_shift: [reader.f64(), reader.f64()],
            zoom: reader.f64(),
            k1: reader.f32(),
            k2: reader.f32(),
            render_ratio: reader.f64(),
            distortion_scale: reader.f32(),
            sensor_size: [reader.f64(), reader.f64()],
            pixel_aspect_ratio: reader.f64(),
            nodal_offset: reader.f64(),
        })
    }
}

struct TrackReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl TrackReader<'_> {
    fn f64(&mut self) -> f64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.bytes[self.offset..self.offset + 8]);
        self.offset += 8;
        f64::from_le_bytes(raw)
    }

    fn f32(&mut self) -> f32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.bytes[self.offset..self.offset + 4]);
        self.offset += 4;
        f32::from_le_bytes(raw)
    }
}
