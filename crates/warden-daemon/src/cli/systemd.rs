use std::fs;
use std::path::Path;
use warden_daemon::supervisor::EXIT_OK;
use warden_types::{WardenError, WardenResult};

pub const SERVICE_FILE: &str = "warden.service";
pub const TIMER_FILE: &str = "warden.timer";

pub fn service_unit(user: &str, config_path: &Path) -> String {
    format!(r#"[Unit]
Description=Warden health supervisor tick
After=network-online.target
Wants=network-online.target

[Service]
Type=oneshot
User={user}
Group={user}
ExecStart=/usr/local/bin/warden -c {config} tick
SuccessExitStatus=3
TimeoutStartSec=600

NoNewPrivileges=yes
PrivateTmp=yes
"#, user = user, config = config_path.display())
}

pub fn timer_unit(interval_secs: u64) -> String {
    format!(r#"[Unit]
Description=Run the Warden health supervisor every {interval}s

[Timer]
OnBootSec={interval}s
OnUnitActiveSec={interval}s
AccuracySec=1s
Persistent=true

[Install]
WantedBy=timers.target
"#, interval = interval_secs)
}

/// Shell commands that install both units; each unit body sits in a quoted
/// heredoc so the output can be pasted as is.
pub fn install_script(output_dir: &Path, service: &str, timer: &str) -> String {
    let mut script = String::new();
    for (file, body) in [(SERVICE_FILE, service), (TIMER_FILE, timer)] {
        script.push_str(&format!(
            "sudo tee {} > /dev/null << 'EOF'\n",
            output_dir.join(file).display()
        ));
        script.push_str(body);
        if !body.ends_with('\n') {
            script.push('\n');
        }
        script.push_str("EOF\n");
    }
    script.push_str("sudo systemctl daemon-reload\n");
    script.push_str(&format!("sudo systemctl enable --now {}\n", TIMER_FILE));
    script
}

pub fn write_units(output_dir: &Path, service: &str, timer: &str) -> WardenResult<()> {
    fs::create_dir_all(output_dir).map_err(|e| {
        WardenError::Io(format!("Failed to create {}: {}", output_dir.display(), e))
    })?;
    for (file, body) in [(SERVICE_FILE, service), (TIMER_FILE, timer)] {
        let path = output_dir.join(file);
        fs::write(&path, body)
            .map_err(|e| WardenError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    }
    Ok(())
}

pub fn generate_systemd(
    output_dir: &Path,
    user: &str,
    config_path: &Path,
    interval_secs: u64,
    write: bool,
) -> WardenResult<u8> {
    let service = service_unit(user, config_path);
    let timer = timer_unit(interval_secs);

    if write {
        write_units(output_dir, &service, &timer)?;
        println!(
            "\x1b[38;5;46m[+]\x1b[0m Wrote {} and {} to {}",
            SERVICE_FILE,
            TIMER_FILE,
            output_dir.display()
        );
        println!("Then run:");
        println!("  \x1b[38;5;51msudo systemctl daemon-reload\x1b[0m");
        println!("  \x1b[38;5;51msudo systemctl enable --now {}\x1b[0m", TIMER_FILE);
        return Ok(EXIT_OK);
    }

    println!("\x1b[38;5;46mGenerating systemd units...\x1b[0m\n");
    println!("# {}", SERVICE_FILE);
    println!("{}", service);
    println!("# {}", TIMER_FILE);
    println!("{}", timer);
    println!("# To install, paste:");
    print!("{}", install_script(output_dir, &service, &timer));
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_unit_is_oneshot() {
        let unit = service_unit("warden", Path::new("/etc/warden/warden.toml"));
        assert!(unit.contains("Type=oneshot"));
        assert!(unit.contains("ExecStart=/usr/local/bin/warden -c /etc/warden/warden.toml tick"));
        assert!(unit.contains("User=warden"));
    }

    #[test]
    fn test_timer_uses_interval() {
        let unit = timer_unit(300);
        assert!(unit.contains("OnUnitActiveSec=300s"));
        assert!(unit.contains("WantedBy=timers.target"));
    }

    #[test]
    fn test_install_script_embeds_units_in_heredocs() {
        let service = service_unit("warden", Path::new("/etc/warden/warden.toml"));
        let timer = timer_unit(300);
        let script = install_script(Path::new("/etc/systemd/system"), &service, &timer);
        let lines: Vec<&str> = script.lines().collect();

        let service_start = lines
            .iter()
            .position(|l| *l == "sudo tee /etc/systemd/system/warden.service > /dev/null << 'EOF'")
            .unwrap();
        let timer_start = lines
            .iter()
            .position(|l| *l == "sudo tee /etc/systemd/system/warden.timer > /dev/null << 'EOF'")
            .unwrap();
        assert!(service_start < timer_start);

        let service_body = lines[service_start + 1..timer_start].join("\n");
        assert!(service_body.contains("Type=oneshot"));
        assert_eq!(lines[timer_start - 1], "EOF");
        assert!(lines[timer_start + 1..].contains(&"OnUnitActiveSec=300s"));

        assert_eq!(lines.iter().filter(|l| **l == "EOF").count(), 2);
        assert_eq!(lines[lines.len() - 2], "sudo systemctl daemon-reload");
        assert_eq!(lines[lines.len() - 1], "sudo systemctl enable --now warden.timer");
        assert_eq!(lines[lines.len() - 3], "EOF");
    }

    #[test]
    fn test_install_script_terminates_unterminated_body() {
        let script = install_script(Path::new("/tmp/units"), "[Unit]", "[Timer]");
        assert!(script.contains("[Unit]\nEOF\n"));
        assert!(script.contains("[Timer]\nEOF\n"));
    }

    #[test]
    fn test_write_units() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("system");
        write_units(&out, "[Unit]\n", "[Timer]\n").unwrap();
        assert_eq!(fs::read_to_string(out.join(SERVICE_FILE)).unwrap(), "[Unit]\n");
        assert_eq!(fs::read_to_string(out.join(TIMER_FILE)).unwrap(), "[Timer]\n");
    }
}
