//! Parse and validate the embedded WGSL programs with naga, and check that
//! the uniform blocks have the same size on both sides.

use lightcone::shader::{ConeUniforms, ParticleUniforms, CONE_SHADER, PARTICLE_SHADER};

fn validate_wgsl(code: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(code)
        .map_err(|e| format!("WGSL parse error: {}", e.emit_to_string(code)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(module)
}

fn struct_span(module: &naga::Module, name: &str) -> Option<u32> {
    module.types.iter().find_map(|(_, ty)| match &ty.inner {
        naga::TypeInner::Struct { span, .. } if ty.name.as_deref() == Some(name) => Some(*span),
        _ => None,
    })
}

fn entry_points(module: &naga::Module) -> Vec<(&str, naga::ShaderStage)> {
    module
        .entry_points
        .iter()
        .map(|ep| (ep.name.as_str(), ep.stage))
        .collect()
}

#[test]
fn test_cone_shader_validates() {
    let module = validate_wgsl(CONE_SHADER).unwrap();
    let eps = entry_points(&module);
    assert!(eps.contains(&("vs_main", naga::ShaderStage::Vertex)));
    assert!(eps.contains(&("fs_main", naga::ShaderStage::Fragment)));
}

#[test]
fn test_particle_shader_validates() {
    let module = validate_wgsl(PARTICLE_SHADER).unwrap();
    let eps = entry_points(&module);
    assert!(eps.contains(&("vs_main", naga::ShaderStage::Vertex)));
    assert!(eps.contains(&("fs_main", naga::ShaderStage::Fragment)));
}

#[test]
fn test_cone_uniform_layout_matches() {
    let module = validate_wgsl(CONE_SHADER).unwrap();
    assert_eq!(
        struct_span(&module, "ConeUniforms"),
        Some(std::mem::size_of::<ConeUniforms>() as u32)
    );
}

#[test]
fn test_particle_uniform_layout_matches() {
    let module = validate_wgsl(PARTICLE_SHADER).unwrap();
    assert_eq!(
        struct_span(&module, "ParticleUniforms"),
        Some(std::mem::size_of::<ParticleUniforms>() as u32)
    );
}
