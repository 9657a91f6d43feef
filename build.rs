use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{bail, Context, Result};

fn output_file_for_shader_file(shader_file_path: &Path) -> Result<PathBuf> {
    let shader_file_name = shader_file_path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| {
            format!(
                "Unable to get file name for shader at path {:#?}",
                shader_file_path,
            )
        })?;
    let output_file_name = format!("{}.spv", shader_file_name);
    Ok(shader_file_path.with_file_name(output_file_name))
}

fn needs_rebuild(shader_file_path: &Path, output_path: &Path) -> Result<bool> {
    if !output_path.try_exists()? {
        return Ok(true);
    }

    let shader_last_modified_time =
        std::fs::metadata(shader_file_path)?.modified()?;
    let output_last_modified_time =
        std::fs::metadata(output_path)?.modified()?;

    Ok(shader_last_modified_time > output_last_modified_time)
}

fn compile_shader(shader_file_path: &Path) -> Result<()> {
    let shader_path_str = shader_file_path.display();
    println!("cargo:rerun-if-changed={}", shader_path_str);

    let output_path = output_file_for_shader_file(shader_file_path)?;
    if !needs_rebuild(shader_file_path, &output_path).unwrap_or(true) {
        return Ok(());
    }

    let result = Command::new("glslc")
        .arg(shader_file_path)
        .arg("-o")
        .arg(&output_path)
        .arg("--target-env=vulkan1.1")
        .output();

    let output = match result {
        Ok(output) => output,

        // The committed binary is still usable without the shader compiler.
        Err(err) if err.kind() == ErrorKind::NotFound && output_path.exists() => {
            println!(
                "cargo:warning=glslc not found, using existing {}",
                output_path.display()
            );
            return Ok(());
        }

        Err(err) => {
            return Err(err).with_context(|| {
                format!("Unable to run glslc for shader {}", shader_path_str)
            });
        }
    };

    if !output.status.success() {
        eprintln!("{}", String::from_utf8_lossy(&output.stdout));
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        bail!("Error running glslc for shader at {:#?}", shader_file_path);
    }

    println!(
        "cargo:warning={} -> {}",
        shader_path_str,
        output_path.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let all_paths = glob::glob("./src/**/*.vert")?
        .chain(glob::glob("./src/**/*.frag")?);
    for path_entry in all_paths {
        compile_shader(path_entry?.as_path())?;
    }

    Ok(())
}
