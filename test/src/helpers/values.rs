// Pin payload encoders, little-endian like the wire format

pub fn bool_value(value: bool) -> Vec<u8> {
    vec![u8::from(value)]
}

pub fn int32(value: i32) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

pub fn float(value: f32) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

pub fn vec3(x: f64, y: f64, z: f64) -> Vec<u8> {
    [x, y, z].iter().flat_map(|value| value.to_le_bytes()).collect()
}

pub fn vec4f(x: f32, y: f32, z: f32, w: f32) -> Vec<u8> {
    [x, y, z, w].iter().flat_map(|value| value.to_le_bytes()).collect()
}

/// Null-terminated string pin payload
pub fn wire_string(value: &str) -> Vec<u8> {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    bytes
}
