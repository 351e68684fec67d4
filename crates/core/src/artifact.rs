// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Images under test and the distribution suites that group them.
//!
//! An [`ImageArtifact`] names one OBS package whose published binary gets
//! booted by openQA. A [`DistroTestSuite`] bundles the artifacts built for one
//! distribution/version pair.

use crate::params::ParameterSet;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Repository that OBS publishes kiwi images into unless told otherwise.
pub const DEFAULT_REPOSITORY: &str = "images";

/// Subdirectory of the repository where ISOs get published.
pub const ISO_SUBDIR: &str = "iso";

/// Binary suffixes that count as a bootable image at all.
pub const IMAGE_SUFFIXES: &[&str] = &[".iso", ".xz", ".qcow2", ".raw"];

/// Error parsing one of the closed enums in this module from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {what} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    pub what: &'static str,
    pub value: String,
    pub expected: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    #[default]
    #[serde(rename = "x86_64")]
    X86_64,
}

crate::simple_display! {
    Arch {
        X86_64 => "x86_64",
    }
}

/// What openQA does with the image, which decides the test suite it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestKind {
    /// Live ISO: booted, logged into, shut down.
    LiveIso,
    /// Unattended installation ISO: booted until the installation finishes.
    InstallIso,
    /// Disk image: booted directly, logged into, rebooted.
    DiskImage,
}

impl TestKind {
    /// Base flavor name as configured in the openQA products.
    pub fn base_flavor(self) -> &'static str {
        match self {
            TestKind::LiveIso => "kiwi-test-iso",
            TestKind::InstallIso => "kiwi-install-iso",
            TestKind::DiskImage => "kiwi-test-disk",
        }
    }

    /// Flavor for a (kind, firmware mode) pair: `-efi` suffixed in firmware mode.
    pub fn flavor(self, firmware_mode: bool) -> String {
        if firmware_mode {
            format!("{}-efi", self.base_flavor())
        } else {
            self.base_flavor().to_string()
        }
    }

    /// File suffixes a published binary must carry to be booted as this kind.
    pub fn expected_suffixes(self) -> &'static [&'static str] {
        match self {
            TestKind::LiveIso | TestKind::InstallIso => &[".iso"],
            TestKind::DiskImage => &[".xz", ".qcow2", ".raw"],
        }
    }

    pub fn accepts(self, binary: &str) -> bool {
        self.expected_suffixes().iter().any(|suffix| binary.ends_with(suffix))
    }

    pub fn is_iso(self) -> bool {
        matches!(self, TestKind::LiveIso | TestKind::InstallIso)
    }
}

crate::simple_display! {
    TestKind {
        LiveIso => "live-iso",
        InstallIso => "install-iso",
        DiskImage => "disk-image",
    }
}

impl FromStr for TestKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live-iso" => Ok(TestKind::LiveIso),
            "install-iso" => Ok(TestKind::InstallIso),
            "disk-image" => Ok(TestKind::DiskImage),
            other => Err(ParseEnumError {
                what: "test kind",
                value: other.to_string(),
                expected: "live-iso, install-iso, disk-image",
            }),
        }
    }
}

/// Paths to the EFI firmware binaries on the openQA worker, passed as
/// `UEFI_PFLASH_CODE` and `UEFI_PFLASH_VARS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UefiPflash {
    pub code: &'static str,
    pub vars: &'static str,
}

/// Operating system of the openQA workers. Firmware files live in
/// distribution-specific places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    #[default]
    Opensuse,
    Fedora,
}

impl HostOs {
    pub fn uefi_pflash(self) -> UefiPflash {
        match self {
            HostOs::Opensuse => UefiPflash {
                code: "/usr/share/qemu/ovmf-x86_64-ms-code.bin",
                vars: "/usr/share/qemu/ovmf-x86_64-ms-vars.bin",
            },
            // shipped by edk2-ovmf
            HostOs::Fedora => UefiPflash {
                code: "/usr/share/edk2/ovmf/OVMF_CODE.fd",
                vars: "/usr/share/edk2/ovmf/OVMF_VARS.fd",
            },
        }
    }
}

crate::simple_display! {
    HostOs {
        Opensuse => "opensuse",
        Fedora => "fedora",
    }
}

impl FromStr for HostOs {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opensuse" => Ok(HostOs::Opensuse),
            "fedora" => Ok(HostOs::Fedora),
            other => Err(ParseEnumError {
                what: "host os",
                value: other.to_string(),
                expected: "opensuse, fedora",
            }),
        }
    }
}

/// One OBS package whose published image gets booted by openQA.
///
/// By convention there is one artifact per (package, kind); the same package
/// may appear twice when it produces both a disk image and an install ISO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub project: String,
    pub package: String,
    pub repository: String,
    pub subdir: Option<String>,
    pub arch: Arch,
    pub kind: TestKind,
    /// Caller-declared overrides merged into the composed parameters.
    pub extra_params: ParameterSet,
    pub supports_firmware_mode: bool,
}

impl ImageArtifact {
    pub fn new(project: impl Into<String>, package: impl Into<String>, kind: TestKind) -> Self {
        Self {
            project: project.into(),
            package: package.into(),
            repository: DEFAULT_REPOSITORY.to_string(),
            subdir: None,
            arch: Arch::default(),
            kind,
            extra_params: ParameterSet::new(),
            supports_firmware_mode: true,
        }
    }

    pub fn live_iso(project: impl Into<String>, package: impl Into<String>) -> Self {
        Self::new(project, package, TestKind::LiveIso).subdir(ISO_SUBDIR)
    }

    pub fn install_iso(project: impl Into<String>, package: impl Into<String>) -> Self {
        Self::new(project, package, TestKind::InstallIso).subdir(ISO_SUBDIR)
    }

    pub fn disk_image(project: impl Into<String>, package: impl Into<String>) -> Self {
        Self::new(project, package, TestKind::DiskImage)
    }

    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = repository.into();
        self
    }

    pub fn subdir(mut self, subdir: impl Into<String>) -> Self {
        self.subdir = Some(subdir.into()).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn extra_params(mut self, params: ParameterSet) -> Self {
        self.extra_params = params;
        self
    }

    /// Mark the image as booting in legacy BIOS mode only.
    pub fn without_firmware_mode(mut self) -> Self {
        self.supports_firmware_mode = false;
        self
    }
}

/// The artifacts built for one distribution/version pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistroTestSuite {
    pub distri: String,
    pub version: String,
    pub artifacts: Vec<ImageArtifact>,
    /// Whether artifacts that support it also get an EFI run.
    pub with_firmware_mode: bool,
    /// Fetch the images via https. The openQA host must be able to reach the
    /// download mirror over TLS for this to work.
    pub use_secure_download: bool,
}

impl DistroTestSuite {
    pub fn new(
        distri: impl Into<String>,
        version: impl Into<String>,
        artifacts: Vec<ImageArtifact>,
    ) -> Self {
        Self {
            distri: distri.into(),
            version: version.into(),
            artifacts,
            with_firmware_mode: true,
            use_secure_download: false,
        }
    }

    pub fn set_use_secure_download(&mut self, use_secure_download: bool) {
        self.use_secure_download = use_secure_download;
    }

    /// `<version>+<distri>`, the key used to pick a single suite on the command line.
    pub fn key(&self) -> String {
        format!("{}+{}", self.version, self.distri)
    }

    /// Firmware modes each artifact is triggered in, in trigger order.
    pub fn firmware_modes(&self, artifact: &ImageArtifact) -> &'static [bool] {
        if self.with_firmware_mode && artifact.supports_firmware_mode {
            &[false, true]
        } else {
            &[false]
        }
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
