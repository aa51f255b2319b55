use uuid::Uuid;

/// Hands out pin and node ids.
///
/// Random ids back anything that mirrors the live model, since those objects
/// are re-created on every scan. Deterministic ids are derived by hashing the
/// namespacing key with a logical name, so engine-defined items keep the same
/// id across sessions.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    namespace: Uuid,
    key: String,
}

impl IdGenerator {
    pub fn new(key: &str) -> Self {
        Self {
            namespace: Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()),
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn random(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// Same `name` under the same key always yields the same id
    pub fn deterministic(&self, name: &str) -> Uuid {
        let mut seed = String::with_capacity(self.key.len() + name.len());
        seed.push_str(&self.key);
        seed.push_str(name);
        Uuid::new_v5(&self.namespace, seed.as_bytes())
    }
}
