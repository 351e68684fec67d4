// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The kiwi test matrix: which images get booted for which distribution.
//!
//! Every suite pulls its images from a `Virtualization:Appliances:Images:Testing_x86:*`
//! project on build.opensuse.org.

use crate::artifact::{DistroTestSuite, ImageArtifact};
use crate::params::{keys, ParameterSet};

pub const OPENSUSE: &str = "opensuse";
pub const FEDORA: &str = "fedora";
pub const SLE: &str = "sle";
pub const CENTOS: &str = "centos";
pub const UBUNTU: &str = "ubuntu";
pub const DEBIAN: &str = "debian";
pub const ARCHLINUX: &str = "archlinux";

/// Distributions accepted by [`select_distros`].
pub const DISTRIBUTIONS: &[&str] = &[OPENSUSE, FEDORA, SLE, CENTOS, UBUNTU, DEBIAN, ARCHLINUX];

const PROJECT_PREFIX: &str = "Virtualization:Appliances:Images:Testing_x86";

fn project(name: &str) -> String {
    format!("{PROJECT_PREFIX}:{name}")
}

fn ram(megabytes: i64) -> ParameterSet {
    ParameterSet::new().with(keys::QEMURAM, megabytes)
}

/// Legacy BIOS images need less memory than the default worker machine.
fn legacy_params() -> ParameterSet {
    ram(2048)
}

/// Ramdisk deployments unpack the whole image into memory.
fn ramdisk_params() -> ParameterSet {
    ram(4096)
}

fn tumbleweed() -> DistroTestSuite {
    let prj = project("tumbleweed");
    let mut artifacts: Vec<ImageArtifact> = [
        "test-image-MicroOS",
        "test-image-custom-partitions",
        "test-image-disk",
        "test-image-disk-simple",
        "test-image-luks",
        "test-image-lvm",
        "test-image-orthos",
        "test-image-overlayroot",
        "test-image-suse-on-dnf",
        "test-image-raid",
        "test-image-bundle-format",
        "test-image-partitions-and-volumes",
    ]
    .into_iter()
    .map(|pkg| ImageArtifact::disk_image(&prj, pkg))
    .collect();

    artifacts.extend([
        ImageArtifact::disk_image(&prj, "test-image-disk-legacy").extra_params(legacy_params()),
        ImageArtifact::disk_image(&prj, "test-image-disk-ramdisk").extra_params(ramdisk_params()),
        ImageArtifact::disk_image(&prj, "test-image-qcow-openstack").without_firmware_mode(),
    ]);
    artifacts.extend(
        ["test-image-MicroOS", "test-image-custom-partitions", "test-image-disk", "test-image-raid"]
            .into_iter()
            .map(|pkg| ImageArtifact::install_iso(&prj, pkg)),
    );
    artifacts.extend([
        ImageArtifact::install_iso(&prj, "test-image-disk-legacy").extra_params(legacy_params()),
        ImageArtifact::live_iso(&prj, "test-image-live:BIOS").without_firmware_mode(),
        ImageArtifact::live_iso(&prj, "test-image-live:Standard"),
        ImageArtifact::live_iso(&prj, "test-image-live:Secure"),
        ImageArtifact::live_iso(&prj, "test-image-disk-ramdisk").extra_params(ramdisk_params()),
    ]);

    DistroTestSuite::new(OPENSUSE, "Tumbleweed", artifacts)
}

fn leap() -> DistroTestSuite {
    let prj = project("leap");
    let mut artifacts: Vec<ImageArtifact> = ["test-image-custom-partitions", "test-image-disk"]
        .into_iter()
        .map(|pkg| ImageArtifact::install_iso(&prj, pkg))
        .collect();
    artifacts.extend(
        [
            "test-image-custom-partitions",
            "test-image-disk",
            "test-image-disk-simple",
            "test-image-luks",
            "test-image-lvm",
            "test-image-overlayroot",
        ]
        .into_iter()
        .map(|pkg| ImageArtifact::disk_image(&prj, pkg)),
    );
    artifacts.extend([
        ImageArtifact::disk_image(&prj, "test-image-disk-ramdisk").extra_params(ramdisk_params()),
        ImageArtifact::live_iso(&prj, "test-image-live"),
        ImageArtifact::live_iso(&prj, "test-image-disk-ramdisk").extra_params(ramdisk_params()),
    ]);

    DistroTestSuite::new(OPENSUSE, "Leap", artifacts)
}

/// Fedora, Ubuntu and Debian share one multibuild package with Disk, Virtual
/// and Live flavors.
fn live_disk_suite(distri: &str, version: &str, prj: &str) -> DistroTestSuite {
    DistroTestSuite::new(
        distri,
        version,
        vec![
            ImageArtifact::disk_image(prj, "test-image-live-disk:Disk"),
            ImageArtifact::install_iso(prj, "test-image-live-disk:Disk"),
            ImageArtifact::disk_image(prj, "test-image-live-disk:Virtual"),
            ImageArtifact::live_iso(prj, "test-image-live-disk:Live"),
        ],
    )
}

fn fedora(version: &str, prj: &str) -> DistroTestSuite {
    let prj = project(prj);
    DistroTestSuite::new(
        FEDORA,
        version,
        vec![
            ImageArtifact::disk_image(&prj, "test-image-live-disk:Disk"),
            ImageArtifact::disk_image(&prj, "test-image-live-disk:Virtual"),
            ImageArtifact::disk_image(&prj, "test-image-microdnf"),
            ImageArtifact::install_iso(&prj, "test-image-live-disk:Disk"),
            ImageArtifact::live_iso(&prj, "test-image-live-disk:Live"),
        ],
    )
}

fn sle15() -> DistroTestSuite {
    let prj = project("sle15");
    DistroTestSuite::new(
        SLE,
        "15",
        vec![
            ImageArtifact::disk_image(&prj, "test-image-disk"),
            ImageArtifact::install_iso(&prj, "test-image-disk"),
        ],
    )
}

fn centos(version: &str) -> DistroTestSuite {
    let prj = project("centos");
    let repo = format!("images_CentOS{version}");
    let pkg = |flavor: &str| format!("test-image-live-disk-v{version}:{flavor}");
    DistroTestSuite::new(
        CENTOS,
        version,
        vec![
            ImageArtifact::install_iso(&prj, pkg("Disk")).repository(&repo),
            ImageArtifact::disk_image(&prj, pkg("Disk")).repository(&repo),
            ImageArtifact::live_iso(&prj, pkg("Live")).repository(&repo),
            ImageArtifact::disk_image(&prj, pkg("Virtual")).repository(&repo),
        ],
    )
}

fn archlinux() -> DistroTestSuite {
    let prj = project("archlinux");
    // the KIS flavor cannot be booted by openQA
    DistroTestSuite::new(
        ARCHLINUX,
        "rolling",
        vec![
            ImageArtifact::install_iso(&prj, "test-image-live-disk-kis:Disk"),
            ImageArtifact::disk_image(&prj, "test-image-live-disk-kis:Disk"),
            ImageArtifact::live_iso(&prj, "test-image-live-disk-kis:Live"),
            ImageArtifact::disk_image(&prj, "test-image-live-disk-kis:Virtual"),
        ],
    )
}

/// Every suite, in trigger order.
pub fn all() -> Vec<DistroTestSuite> {
    vec![
        tumbleweed(),
        leap(),
        fedora("Rawhide", "rawhide"),
        fedora("37", "fedora"),
        sle15(),
        centos("8"),
        centos("9"),
        live_disk_suite(UBUNTU, "22.04", &project("ubuntu")),
        live_disk_suite(DEBIAN, "10", &project("debian")),
        archlinux(),
    ]
}

/// Suites of the given distributions, keeping their order.
pub fn select_distros(
    suites: Vec<DistroTestSuite>,
    distros: &[impl AsRef<str>],
) -> Vec<DistroTestSuite> {
    suites.into_iter().filter(|suite| distros.iter().any(|d| d.as_ref() == suite.distri)).collect()
}

/// The suite for a `<version>+<distri>` key.
pub fn find<'a>(suites: &'a [DistroTestSuite], key: &str) -> Option<&'a DistroTestSuite> {
    suites.iter().find(|suite| suite.key() == key)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
