//! Specular reflectivity of a thick single-layer mirror coating.

mod scattering;

use crate::common::constants::{
    AVOGADRO, PER_CM3_TO_PER_ANGSTROM3, PI, PLANCK_HC_EV_ANGSTROM, RADDEG, R_ELECTRON_ANGSTROM,
};
use crate::domain::{ComputeResult, MirrorError};

use num_complex::Complex64;

/// One reflectivity evaluation: material, geometry, and the energies to
/// evaluate at. The angle is measured from the surface normal in degrees,
/// i.e. the complement of the grazing angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectivityRequest<'a> {
    pub material: &'a str,
    pub density_g_cm3: f64,
    pub atomic_mass: f64,
    pub energies_ev: &'a [f64],
    pub angle_from_normal_deg: f64,
}

/// Capability seam around the optical-constants model: given material,
/// geometry, and an energy array, return one specular reflectivity per
/// energy. Implementations may tabulate, compute, or mock.
pub trait ReflectivityModel {
    fn reflectivity(&self, request: &ReflectivityRequest<'_>) -> ComputeResult<Vec<f64>>;
}

/// Fresnel reflectivity from tabulated anomalous scattering factors.
///
/// Per energy: f1/f2 lookup, refractive index n = 1 - delta - i*beta with
/// delta = r_e lambda^2 N f1 / 2pi (beta likewise from f2, N the atomic
/// number density), then the s-polarization Fresnel amplitude for the grazing
/// geometry and |r|^2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FresnelModel;

impl ReflectivityModel for FresnelModel {
    fn reflectivity(&self, request: &ReflectivityRequest<'_>) -> ComputeResult<Vec<f64>> {
        validate_request(request)?;

        let table = scattering::table_for_material(request.material).ok_or_else(|| {
            MirrorError::computation(
                "RUN.OPTICS_MATERIAL",
                format!(
                    "no tabulated optical constants for material '{}'",
                    request.material
                ),
            )
        })?;

        let grazing_rad = (90.0 - request.angle_from_normal_deg) / RADDEG;
        let sin_grazing = grazing_rad.sin();
        let cos_grazing = grazing_rad.cos();

        // atoms per cubic angstrom
        let number_density = request.density_g_cm3 * AVOGADRO / request.atomic_mass
            * PER_CM3_TO_PER_ANGSTROM3;

        let mut reflectivity = Vec::with_capacity(request.energies_ev.len());
        for &energy_ev in request.energies_ev {
            let (f1, f2) = table.anomalous_factors(energy_ev).ok_or_else(|| {
                let (lower, upper) = table.energy_range_ev();
                MirrorError::computation(
                    "RUN.OPTICS_RANGE",
                    format!(
                        "energy {} eV is outside the tabulated optical-constant range \
                         [{}, {}] eV for '{}'",
                        energy_ev, lower, upper, table.symbol
                    ),
                )
            })?;

            let wavelength_ang = PLANCK_HC_EV_ANGSTROM / energy_ev;
            let dispersion_scale =
                R_ELECTRON_ANGSTROM * wavelength_ang * wavelength_ang * number_density / (2.0 * PI);
            let delta = dispersion_scale * f1;
            let beta = dispersion_scale * f2;

            let index = Complex64::new(1.0 - delta, -beta);
            let wave_number = 2.0 * PI / wavelength_ang;
            let kiz = Complex64::new(wave_number * sin_grazing, 0.0);
            let ktz = (index * index - Complex64::new(cos_grazing * cos_grazing, 0.0)).sqrt()
                * Complex64::new(wave_number, 0.0);

            let amplitude = (kiz - ktz) / (kiz + ktz);
            reflectivity.push((amplitude * amplitude.conj()).re);
        }

        Ok(reflectivity)
    }
}

fn validate_request(request: &ReflectivityRequest<'_>) -> ComputeResult<()> {
    if !request.density_g_cm3.is_finite() || request.density_g_cm3 <= 0.0 {
        return Err(MirrorError::input_validation(
            "INPUT.OPTICS_DENSITY",
            format!(
                "density must be finite and > 0 g/cm^3, got {}",
                request.density_g_cm3
            ),
        ));
    }
    if !request.atomic_mass.is_finite() || request.atomic_mass <= 0.0 {
        return Err(MirrorError::input_validation(
            "INPUT.OPTICS_MASS",
            format!(
                "atomic mass must be finite and > 0 g/mol, got {}",
                request.atomic_mass
            ),
        ));
    }
    if !request.angle_from_normal_deg.is_finite()
        || request.angle_from_normal_deg <= 0.0
        || request.angle_from_normal_deg >= 90.0
    {
        return Err(MirrorError::input_validation(
            "INPUT.OPTICS_ANGLE",
            format!(
                "angle from normal must lie in (0, 90) deg exclusive, got {}",
                request.angle_from_normal_deg
            ),
        ));
    }
    Ok(())
}
