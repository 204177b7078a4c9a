use cpal::traits::DeviceTrait;

/// Display name for a cpal device, if the backend can report one.
pub(crate) fn device_label(device: &cpal::Device) -> Option<String> {
    device.name().ok().filter(|name| !name.trim().is_empty())
}
