//! Helpers shared by unit tests and the end-to-end tests in `tests/`
//!
//! Scripts call tools by absolute path so they keep working when `PATH` is
//! restricted to a stub directory.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script into `dir`
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A fake CMake that records its arguments and mimics configure and build
///
/// Arguments are appended to `dir/cmake.log`. Configure creates the
/// configuration directory and, when `compile_db` is set, a compile database
/// in it. Build writes an executable named `exe` into `exe_dir`. Both print
/// a line of output and return `exit_code`.
pub fn fake_cmake(
    dir: &Path,
    exe_dir: &Path,
    exe: &str,
    compile_db: bool,
    exit_code: i32,
) -> PathBuf {
    let log = dir.join("cmake.log");
    let db = if compile_db {
        "echo '[]' > \"$2/compile_commands.json\""
    } else {
        ":"
    };
    let body = format!(
        r#"echo "$@" >> '{log}'
echo "stub cmake output"
if [ "$1" = "-B" ]; then
  /bin/mkdir -p "$2"
  {db}
elif [ "$1" = "--build" ]; then
  /bin/mkdir -p '{exe_dir}'
  printf '#!/bin/sh\nexit 0\n' > '{exe_dir}/{exe}'
  /bin/chmod +x '{exe_dir}/{exe}'
fi
exit {exit_code}"#,
        log = log.display(),
        db = db,
        exe_dir = exe_dir.display(),
        exe = exe,
        exit_code = exit_code,
    );
    write_script(dir, "cmake", &body)
}
