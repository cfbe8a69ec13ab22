use cap_std::{ambient_authority, fs_utf8::camino::Utf8PathBuf, fs_utf8::Dir};
use miette::{Context, IntoDiagnostic, Result};

/// Ribbon data directory
/// We will read a path from env `RIBBON_DATA_DIR` or create a folder at data_local_dir/ribbon, where data_local_dir is platform specific
/// Inside this directory, we will store the configuration file and the logs.
pub fn get_ribbon_dir() -> Result<Dir> {
    let authoratah = ambient_authority();
    let rdir = if let Ok(env_dir) = std::env::var("RIBBON_DATA_DIR") {
        let ribbon_path = Utf8PathBuf::from(&env_dir); //may still be an invalid path

        Dir::create_ambient_dir_all(&ribbon_path, authoratah)
            .into_diagnostic()
            .wrap_err(ribbon_path.clone())
            .wrap_err("failed to create ribbon directory")?;
        Dir::open_ambient_dir(&ribbon_path, authoratah)
            .into_diagnostic()
            .wrap_err(ribbon_path)
            .wrap_err("failed to open ribbon data dir")?
    } else {
        let project_dir =
            cap_directories::ProjectDirs::from("com.ribbon", "", "ribbon", authoratah);
        let dir = project_dir
            .ok_or(miette::miette!(
                "getting project dirs failed for some reason"
            ))?
            .data_local_dir()
            .into_diagnostic()
            .wrap_err("failed ot get data local dir using capstd")?;
        Dir::from_cap_std(dir) // into utf-8 dir
    };
    Ok(rdir)
}
