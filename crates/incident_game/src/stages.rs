//! Scripted incident scenarios.

/// One incident: what broke, what the player can inspect, and the single
/// command that resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub title: &'static str,
    pub mission: &'static str,
    /// Virtual file paths and their contents, as `cat`/`ls` see them.
    pub files: &'static [(&'static str, &'static str)],
    pub solution: &'static str,
    pub hint: &'static str,
    /// Explanation shown on stage clear, markdown.
    pub article: &'static str,
}

impl Stage {
    #[must_use]
    pub fn file_contents(&self, path: &str) -> Option<&'static str> {
        self.files
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, contents)| *contents)
    }
}

pub const STAGES: &[Stage] = &[
    Stage {
        title: "Port 80 Blocked",
        mission: "Nginx service is down. Investigate the logs.",
        files: &[(
            "/var/log/nginx/error.log",
            "bind() to 0.0.0.0:80 failed (Address already in use)",
        )],
        solution: "killall apache2",
        hint: "Check /var/log/nginx/error.log. Is another web server running?",
        article: "### Port Conflict\n\nIn Linux, only one process can use a port at a time. \
                  Port 80 is the default for HTTP.",
    },
    Stage {
        title: "Permission Trap",
        mission: "Nginx cannot read the configuration file.",
        files: &[("/etc/nginx/nginx.conf", "Error: Permission Denied")],
        solution: "chmod 644 /etc/nginx/nginx.conf",
        hint: "Configuration files should be readable. Try chmod 644.",
        article: "### File Permissions\n\nConfig files should be `644` (root:rw, others:r) \
                  for services to read them.",
    },
    Stage {
        title: "Disk Space Exhausted",
        mission: "System says 'No space left on device'.",
        files: &[("/var/log/syslog", "write error: No space left on device")],
        solution: "rm -rf /tmp/large_temp_file.log",
        hint: "Check /tmp for large logs and delete them with rm.",
        article: "### Disk Management\n\nWhen the disk is 100% full, services cannot write \
                  logs and will crash.",
    },
    Stage {
        title: "Corrupted SSH Key",
        mission: "SSH access failing: Host key permissions are too open.",
        files: &[("/etc/ssh/ssh_host_rsa_key", "Permissions 0777 are too open.")],
        solution: "chmod 600 /etc/ssh/ssh_host_rsa_key",
        hint: "Private keys must be protected. Use chmod 600.",
        article: "### SSH Security\n\nSSH refuses to use private keys that are accessible \
                  by other users.",
    },
    Stage {
        title: "Missing Dependency",
        mission: "Binary 'app' won't run. libssl.so.1.1 is missing.",
        files: &[(
            "error",
            "cannot open shared object file: No such file or directory",
        )],
        solution: "apt-get install libssl-dev",
        hint: "You need to install the SSL development library via apt-get.",
        article: "### Shared Libraries\n\nInstalling the `-dev` package usually restores \
                  missing `.so` files.",
    },
    Stage {
        title: "Wrong Owner",
        mission: "Web directory is owned by root, but www-data needs access.",
        files: &[("/var/www/html", "Owner: root, Permissions: drwxr-xr-x")],
        solution: "chown www-data:www-data /var/www/html",
        hint: "Change the owner to www-data using chown.",
        article: "### Ownership\n\nChanging file owners is crucial for service-specific \
                  directory access.",
    },
    Stage {
        title: "Zombie Process",
        mission: "A stuck app is consuming resources. Normal kill fails.",
        files: &[("ps", "PID 9999: [app] <defunct>")],
        solution: "kill -9 9999",
        hint: "Use the force signal (-9) to terminate the process.",
        article: "### Process Signals\n\nSignal 9 (SIGKILL) forces a process to terminate \
                  immediately.",
    },
    Stage {
        title: "DNS Resolution Failure",
        mission: "Names don't resolve. Server can't reach the internet.",
        files: &[("/etc/resolv.conf", "nameserver 0.0.0.0")],
        solution: "echo 'nameserver 8.8.8.8' > /etc/resolv.conf",
        hint: "Set a valid nameserver like 8.8.8.8 in resolv.conf.",
        article: "### DNS Config\n\n`/etc/resolv.conf` controls how domain names are \
                  resolved.",
    },
    Stage {
        title: "SWAP Pressure",
        mission: "System slow. RAM is full and swap is inactive.",
        files: &[("/proc/swaps", "Filename: (empty)")],
        solution: "swapon /swapfile",
        hint: "Check /proc/swaps and enable it with swapon.",
        article: "### Swap Space\n\nSwap acts as virtual memory on the disk when RAM is \
                  full.",
    },
    Stage {
        title: "Kernel Module Missing",
        mission: "Iptables failing: Module ip_tables not found.",
        files: &[("dmesg", "modprobe: FATAL: Module ip_tables not found.")],
        solution: "modprobe ip_tables",
        hint: "Load the module using modprobe.",
        article: "### Kernel Modules\n\n`modprobe` loads features into the Linux kernel \
                  on-the-fly.",
    },
];

#[cfg(test)]
mod tests {
    use super::STAGES;

    #[test]
    fn ten_stages_with_complete_data() {
        assert_eq!(STAGES.len(), 10);
        for stage in STAGES {
            assert!(!stage.title.is_empty());
            assert!(!stage.mission.is_empty());
            assert!(!stage.files.is_empty());
            assert!(!stage.solution.is_empty());
            assert!(!stage.hint.is_empty());
            assert!(stage.article.starts_with("### "));
        }
    }

    #[test]
    fn solutions_are_unique_and_trimmed() {
        for (index, stage) in STAGES.iter().enumerate() {
            assert_eq!(stage.solution, stage.solution.trim());
            assert!(
                STAGES[index + 1..]
                    .iter()
                    .all(|other| other.solution != stage.solution),
                "duplicate solution: {}",
                stage.solution
            );
        }
    }

    #[test]
    fn file_lookup_finds_exact_paths_only() {
        let stage = &STAGES[0];
        assert!(stage.file_contents("/var/log/nginx/error.log").is_some());
        assert_eq!(stage.file_contents("/var/log/nginx"), None);
    }
}
