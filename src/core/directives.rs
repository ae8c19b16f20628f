//! Build directive generation
//!
//! Materializes the artifacts the external build tool consumes in each
//! target's working directory: `CMakeLists.txt` with the target wiring and
//! `dependencies.cmake` with the resolved library list and framework
//! include/link block. Rendering is a pure function of the resolved
//! target, so writing the same target twice produces byte-identical
//! files; incremental external builds depend on that.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::config::defaults;
use crate::core::manifest::Manifest;
use crate::core::paths;
use crate::core::project::{LibraryDependency, ProvisionedFramework, ResolvedTarget, Target};
use crate::core::resolver::resolve_target_libraries;
use crate::error::DirectiveError;
use crate::infra::filesystem;

/// File name of the main build directive
pub const CMAKELISTS_FILE: &str = "CMakeLists.txt";

/// File name of the dependency wiring directive
pub const DEPENDENCIES_FILE: &str = "dependencies.cmake";

/// Resolve one selected target into its buildable form.
///
/// Fails fast on the invariants from the data model: a platform must be
/// named, only native targets may omit a board, and every referenced
/// library must resolve.
pub fn resolve_target(
    project_dir: &Path,
    merged: &BTreeMap<String, LibraryDependency>,
    target: Target,
    framework: Option<ProvisionedFramework>,
) -> Result<ResolvedTarget, DirectiveError> {
    if target.platform.as_str().is_empty() {
        return Err(DirectiveError::MissingPlatform {
            target: target.name.clone(),
        });
    }
    if !target.platform.allows_missing_board() && target.board_id().is_none() {
        return Err(DirectiveError::MissingBoard {
            target: target.name.clone(),
        });
    }

    let libraries = resolve_target_libraries(merged, &target)?;
    let work_dir = paths::target_dir(project_dir, &target.name);

    Ok(ResolvedTarget {
        target,
        libraries,
        work_dir,
        framework,
    })
}

/// Write both directive files into the target's working directory
pub fn write_directives(
    resolved: &ResolvedTarget,
    manifest: &Manifest,
) -> Result<(), DirectiveError> {
    filesystem::create_dir_all(&resolved.work_dir)?;

    filesystem::write_file(
        &resolved.work_dir.join(CMAKELISTS_FILE),
        &render_cmakelists(resolved, manifest),
    )?;
    filesystem::write_file(
        &resolved.work_dir.join(DEPENDENCIES_FILE),
        &render_dependencies(resolved),
    )?;

    tracing::debug!(
        "Generated directives for target '{}' in {}",
        resolved.target.name,
        resolved.work_dir.display()
    );
    Ok(())
}

/// Render the main CMakeLists.txt for a resolved target
fn render_cmakelists(resolved: &ResolvedTarget, manifest: &Manifest) -> String {
    let target = &resolved.target;
    let mut out = String::new();

    let _ = writeln!(out, "cmake_minimum_required(VERSION 3.10)");
    let _ = writeln!(
        out,
        "project({}-{} C CXX ASM)",
        manifest.project.name, target.name
    );
    out.push('\n');
    let _ = writeln!(
        out,
        "get_filename_component(EMBRA_PROJECT_ROOT \"${{CMAKE_CURRENT_SOURCE_DIR}}/../../..\" ABSOLUTE)"
    );
    let _ = writeln!(out, "set(EMBRA_TARGET_NAME {})", target.name);
    let _ = writeln!(out, "set(EMBRA_PLATFORM {})", target.platform);
    if let Some(board) = target.board_id() {
        let _ = writeln!(out, "set(EMBRA_BOARD {board})");
        let _ = writeln!(out, "add_definitions(-DEMBRA_BOARD_{board})");
    }

    let suffix = paths::platform_extension(&target.platform);
    if !suffix.is_empty() {
        let _ = writeln!(out, "set(CMAKE_EXECUTABLE_SUFFIX \"{suffix}\")");
    }

    if !target.compile_flags.is_empty() {
        let _ = writeln!(out, "add_compile_options({})", target.compile_flags.join(" "));
    }

    out.push('\n');
    let _ = writeln!(out, "include(${{CMAKE_CURRENT_SOURCE_DIR}}/{DEPENDENCIES_FILE})");
    out.push('\n');

    if manifest.options.header_only {
        let _ = writeln!(out, "# Header-only project: no executable is produced");
    } else {
        let _ = writeln!(
            out,
            "file(GLOB_RECURSE EMBRA_SOURCES \"${{EMBRA_PROJECT_ROOT}}/src/*.c\" \"${{EMBRA_PROJECT_ROOT}}/src/*.cc\" \"${{EMBRA_PROJECT_ROOT}}/src/*.cpp\")"
        );
        let _ = writeln!(
            out,
            "add_executable(${{EMBRA_TARGET_NAME}} ${{EMBRA_SOURCES}})"
        );
        let _ = writeln!(
            out,
            "target_link_libraries(${{EMBRA_TARGET_NAME}} ${{EMBRA_LIBRARIES}})"
        );
    }

    out
}

/// Render the dependency and framework wiring file
fn render_dependencies(resolved: &ResolvedTarget) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "set(EMBRA_LIBRARIES \"\")");
    out.push('\n');

    // BTreeMap iteration keeps the listing stable across runs
    for dependency in resolved.libraries.values() {
        let _ = writeln!(
            out,
            "# {} {} ({})",
            dependency.name, dependency.version, dependency.source
        );
        let cmake_name = format!("embra_lib_{}", dependency.name);
        let _ = writeln!(out, "add_library({cmake_name} INTERFACE)");
        if dependency.is_local() {
            let _ = writeln!(
                out,
                "target_include_directories({cmake_name} INTERFACE \"${{EMBRA_PROJECT_ROOT}}/{}/{}/include\")",
                defaults::LIB_DIR, dependency.name
            );
        } else {
            let _ = writeln!(
                out,
                "target_include_directories({cmake_name} INTERFACE \"${{EMBRA_PROJECT_ROOT}}/{}/{}/include\") # {}",
                defaults::LIB_DIR, dependency.name, dependency.source
            );
        }
        let _ = writeln!(out, "list(APPEND EMBRA_LIBRARIES {cmake_name})");
        out.push('\n');
    }

    if let Some(framework) = &resolved.framework {
        let _ = writeln!(out, "# framework {} {}", framework.name, framework.version);
        let _ = writeln!(
            out,
            "set(EMBRA_FRAMEWORK_DIR \"{}\")",
            framework.path.display()
        );
        let _ = writeln!(out, "include_directories(\"${{EMBRA_FRAMEWORK_DIR}}/include\")");
        let _ = writeln!(out, "link_directories(\"${{EMBRA_FRAMEWORK_DIR}}/lib\")");
    }

    out
}
