//! `info` subcommand — show update-check metadata.

use super::{Result, UpdateInfo, kv, kv_width};

pub(super) fn cmd_info(json: bool) -> Result<()> {
    let info = UpdateInfo::current();
    if json {
        return super::print_json(&info);
    }

    let w = kv_width(&["Name:", "Version:", "Check:", "Repository:", "Download:"], &[]);
    kv("Name:", info.display_name, w);
    kv("Version:", info.display_version, w);
    kv("Check:", info.check_type, w);
    kv("Repository:", format_args!("{}/{}", info.user, info.repo), w);
    kv("Download:", &info.download_url, w);
    Ok(())
}
