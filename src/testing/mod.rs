//! In-memory port implementations for exercising steps and commands
//! without touching the host.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::domain::{AppError, ProvisionConfig};
use crate::ports::{
    ContainerRuntime, Firewall, FirewallState, InitSystem, PackageManager, SystemUser,
    UserDatabase,
};
use crate::services::ArtifactRenderer;

#[derive(Default)]
pub struct MockPackages {
    pub installed: RefCell<HashSet<String>>,
    pub refreshes: Cell<usize>,
    pub install_calls: RefCell<Vec<Vec<String>>>,
}

impl MockPackages {
    pub fn with_installed(packages: &[&str]) -> Self {
        let mock = Self::default();
        mock.installed.borrow_mut().extend(packages.iter().map(|p| p.to_string()));
        mock
    }
}

impl PackageManager for MockPackages {
    fn version(&self) -> Option<String> {
        Some("apt 2.4 (mock)".to_string())
    }

    fn refresh_index(&self) -> Result<(), AppError> {
        self.refreshes.set(self.refreshes.get() + 1);
        Ok(())
    }

    fn install(&self, packages: &[&str]) -> Result<(), AppError> {
        let names: Vec<String> = packages.iter().map(|p| p.to_string()).collect();
        self.installed.borrow_mut().extend(names.iter().cloned());
        self.install_calls.borrow_mut().push(names);
        Ok(())
    }

    fn is_installed(&self, package: &str) -> bool {
        self.installed.borrow().contains(package)
    }
}

#[derive(Default)]
pub struct MockRuntime {
    pub engine: RefCell<Option<String>>,
    pub compose: RefCell<Option<String>>,
    pub running: RefCell<Vec<String>>,
    pub engine_installs: Cell<usize>,
    pub up_calls: RefCell<Vec<PathBuf>>,
}

impl MockRuntime {
    pub fn with_engine() -> Self {
        let mock = Self::default();
        *mock.engine.borrow_mut() = Some("Docker version 27.0.0".to_string());
        *mock.compose.borrow_mut() = Some("Docker Compose version v2.29.0".to_string());
        mock
    }
}

impl ContainerRuntime for MockRuntime {
    fn engine_version(&self) -> Option<String> {
        self.engine.borrow().clone()
    }

    fn compose_version(&self) -> Option<String> {
        self.compose.borrow().clone()
    }

    fn install_engine(&self) -> Result<(), AppError> {
        self.engine_installs.set(self.engine_installs.get() + 1);
        // The convenience script installs the compose plugin alongside the engine.
        *self.engine.borrow_mut() = Some("Docker version 27.0.0".to_string());
        *self.compose.borrow_mut() = Some("Docker Compose version v2.29.0".to_string());
        Ok(())
    }

    fn compose_up(&self, compose_file: &Path) -> Result<(), AppError> {
        self.up_calls.borrow_mut().push(compose_file.to_path_buf());
        *self.running.borrow_mut() =
            vec!["traefik".to_string(), "n8n".to_string()];
        Ok(())
    }

    fn running_services(&self, _compose_file: &Path) -> Result<Vec<String>, AppError> {
        Ok(self.running.borrow().clone())
    }
}

#[derive(Default)]
pub struct MockUsers {
    pub accounts: RefCell<HashMap<String, SystemUser>>,
    pub created: RefCell<Vec<String>>,
    pub chown_calls: RefCell<Vec<(String, PathBuf)>>,
}

impl MockUsers {
    pub fn with_user(name: &str, uid: u32) -> Self {
        let mock = Self::default();
        mock.accounts.borrow_mut().insert(
            name.to_string(),
            SystemUser { name: name.to_string(), uid, gid: uid },
        );
        mock
    }
}

impl UserDatabase for MockUsers {
    fn lookup(&self, name: &str) -> Result<Option<SystemUser>, AppError> {
        Ok(self.accounts.borrow().get(name).cloned())
    }

    fn create_service_user(&self, name: &str, _home: &Path) -> Result<(), AppError> {
        self.created.borrow_mut().push(name.to_string());
        self.accounts.borrow_mut().insert(
            name.to_string(),
            SystemUser { name: name.to_string(), uid: 999, gid: 999 },
        );
        Ok(())
    }

    fn chown_recursive(&self, name: &str, path: &Path) -> Result<(), AppError> {
        self.chown_calls.borrow_mut().push((name.to_string(), path.to_path_buf()));
        Ok(())
    }

    fn is_owned_by(&self, path: &Path, user: &SystemUser) -> Result<bool, AppError> {
        Ok(self
            .chown_calls
            .borrow()
            .iter()
            .any(|(name, root)| name == &user.name && path.starts_with(root)))
    }
}

#[derive(Default)]
pub struct MockFirewall {
    pub current: RefCell<FirewallState>,
    pub allowed: RefCell<Vec<u16>>,
    pub enables: Cell<usize>,
    pub fail_enable: Cell<bool>,
}

impl MockFirewall {
    pub fn active_with(ports: &[u16]) -> Self {
        let mock = Self::default();
        *mock.current.borrow_mut() =
            FirewallState { active: true, allowed_tcp: ports.to_vec() };
        mock
    }
}

impl Firewall for MockFirewall {
    fn state(&self) -> Result<FirewallState, AppError> {
        Ok(self.current.borrow().clone())
    }

    fn allow_tcp(&self, port: u16) -> Result<(), AppError> {
        self.allowed.borrow_mut().push(port);
        self.current.borrow_mut().allowed_tcp.push(port);
        Ok(())
    }

    fn enable(&self) -> Result<(), AppError> {
        if self.fail_enable.get() {
            return Err(AppError::Command {
                command: "ufw --force enable".to_string(),
                details: "simulated failure".to_string(),
            });
        }
        self.enables.set(self.enables.get() + 1);
        self.current.borrow_mut().active = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockInit {
    pub enabled: RefCell<HashSet<String>>,
    pub reloads: Cell<usize>,
    pub enable_calls: RefCell<Vec<String>>,
}

impl InitSystem for MockInit {
    fn version(&self) -> Option<String> {
        Some("systemd 249 (mock)".to_string())
    }

    fn daemon_reload(&self) -> Result<(), AppError> {
        self.reloads.set(self.reloads.get() + 1);
        Ok(())
    }

    fn enable(&self, unit: &str) -> Result<(), AppError> {
        self.enable_calls.borrow_mut().push(unit.to_string());
        self.enabled.borrow_mut().insert(unit.to_string());
        Ok(())
    }

    fn is_enabled(&self, unit: &str) -> bool {
        self.enabled.borrow().contains(unit)
    }
}

/// Bundle of mock ports plus a config rooted in a temp directory.
pub struct TestHarness {
    pub config: ProvisionConfig,
    pub renderer: ArtifactRenderer,
    pub packages: MockPackages,
    pub runtime: MockRuntime,
    pub users: MockUsers,
    pub firewall: MockFirewall,
    pub init: MockInit,
    _tempdir: tempfile::TempDir,
}

impl TestHarness {
    /// Harness for a fresh host: nothing installed, nothing running.
    pub fn bare() -> Self {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let config = ProvisionConfig {
            domain: "flows.example.org".to_string(),
            data_dir: tempdir.path().join("n8n"),
            unit_path: tempdir.path().join("system/n8n-stack.service"),
            ..Default::default()
        };
        Self {
            config,
            renderer: ArtifactRenderer::new().expect("renderer"),
            packages: MockPackages::default(),
            runtime: MockRuntime::default(),
            users: MockUsers::default(),
            firewall: MockFirewall::default(),
            init: MockInit::default(),
            _tempdir: tempdir,
        }
    }

    pub fn ctx(&self) -> AppContext<'_> {
        AppContext {
            config: &self.config,
            packages: &self.packages,
            runtime: &self.runtime,
            users: &self.users,
            firewall: &self.firewall,
            init: &self.init,
            renderer: &self.renderer,
        }
    }
}
