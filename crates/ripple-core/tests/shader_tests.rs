// The bundled WGSL must parse, validate and agree with the Rust uniform layouts.

use ripple_core::{CompositeUniforms, SimUniforms, COMPOSITE_WGSL, SIMULATION_WGSL};

fn validate_wgsl(code: &str) -> naga::Module {
    let module = naga::front::wgsl::parse_str(code)
        .unwrap_or_else(|e| panic!("WGSL parse error: {}", e.emit_to_string(code)));
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .unwrap_or_else(|e| panic!("WGSL validation error: {:?}", e));
    module
}

fn struct_size(module: &naga::Module, name: &str) -> u32 {
    let mut layouter = naga::proc::Layouter::default();
    layouter.update(module.to_ctx()).unwrap();
    let (handle, _) = module
        .types
        .iter()
        .find(|(_, ty)| ty.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("struct {name} not found"));
    layouter[handle].size
}

fn entry_points(module: &naga::Module) -> Vec<&str> {
    module.entry_points.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn simulation_shader_matches_uniform_layout() {
    let module = validate_wgsl(SIMULATION_WGSL);
    assert_eq!(
        struct_size(&module, "SimUniforms") as usize,
        std::mem::size_of::<SimUniforms>()
    );
    let entries = entry_points(&module);
    assert!(entries.contains(&"vs_fullscreen"));
    assert!(entries.contains(&"fs_simulate"));
}

#[test]
fn composite_shader_matches_uniform_layout() {
    let module = validate_wgsl(COMPOSITE_WGSL);
    assert_eq!(
        struct_size(&module, "CompositeUniforms") as usize,
        std::mem::size_of::<CompositeUniforms>()
    );
    let entries = entry_points(&module);
    assert!(entries.contains(&"vs_fullscreen"));
    assert!(entries.contains(&"fs_composite"));
}
