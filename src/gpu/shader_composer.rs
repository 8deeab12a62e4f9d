use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

/// WGSL composition with `#import` support.
///
/// The shared scene definitions module is registered once at
/// construction; consuming shaders pull it in with
/// `#import sphaira::scene`. Composition failures are programming
/// errors in the embedded sources and abort with the full diagnostics.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Build a composer with the shared scene module registered.
    #[must_use]
    pub fn new() -> Self {
        let mut composer = Composer::default();
        let _ = composer
            .add_composable_module(ComposableModuleDescriptor {
                source: include_str!("../../assets/shaders/modules/scene.wgsl"),
                file_path: "modules/scene.wgsl",
                language: ShaderLanguage::Wgsl,
                ..Default::default()
            })
            .unwrap_or_else(|e| {
                panic!("Failed to register scene shader module: {e:?}")
            });
        Self { composer }
    }

    /// Resolve `source`'s imports and hand the result to `device` as a
    /// ready shader module.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> wgpu::ShaderModule {
        let module = self.compose_naga(source, file_path).unwrap_or_else(|e| {
            panic!("Failed to compose shader '{file_path}': {e}")
        });
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        })
    }

    /// Composition down to naga IR, usable without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns the composer diagnostics when an import cannot be
    /// resolved or the source fails validation.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, Box<ComposerError>> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(Box::new)
    }
}

impl Default for ShaderComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISC: &str = include_str!("../../assets/shaders/disc.wgsl");

    #[test]
    fn disc_shader_composes_with_both_entry_points() {
        let mut composer = ShaderComposer::new();
        let module = composer
            .compose_naga(DISC, "disc.wgsl")
            .unwrap_or_else(|e| panic!("disc.wgsl failed to compose: {e}"));

        let names: Vec<&str> = module
            .entry_points
            .iter()
            .map(|ep| ep.name.as_str())
            .collect();
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
    }

    #[test]
    fn unresolved_import_is_reported() {
        let mut composer = ShaderComposer::new();
        let result = composer.compose_naga(
            "#import sphaira::nonexistent\n@fragment fn fs_main() { }",
            "broken.wgsl",
        );
        assert!(result.is_err());
    }
}
