use scenesync_shared::{write_global_properties, ByteWriter, GlobalPropertySet, PropertyValue};

/// Authoritative global properties, diffed per cycle against the values
/// last sent to continued observers
#[derive(Default)]
pub struct GlobalPropertyBroadcaster {
    current: GlobalPropertySet,
    observed: GlobalPropertySet,
}

impl GlobalPropertyBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: PropertyValue) -> bool {
        self.current.set(name, value)
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.current.get(name)
    }

    pub fn properties(&self) -> &GlobalPropertySet {
        &self.current
    }

    /// Every property, for newly added observers
    pub fn complete_message(&self, timestamp: f32) -> Vec<u8> {
        let entries: Vec<(&str, &PropertyValue)> = self.current.iter().collect();
        let mut writer = ByteWriter::new();
        write_global_properties(&mut writer, timestamp, &entries);
        writer.to_bytes()
    }

    /// Properties that differ from the last observed values, then records
    /// the current values as observed. `None` when nothing changed.
    pub fn delta_message(&mut self, timestamp: f32) -> Option<Vec<u8>> {
        let changed: Vec<(&str, &PropertyValue)> = self
            .current
            .iter()
            .filter(|(name, value)| self.observed.get(name) != Some(*value))
            .collect();

        let message = if changed.is_empty() {
            None
        } else {
            let mut writer = ByteWriter::new();
            write_global_properties(&mut writer, timestamp, &changed);
            Some(writer.to_bytes())
        };

        for (name, value) in self.current.iter() {
            self.observed.set(name, value.clone());
        }
        message
    }
}
