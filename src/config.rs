//! Runtime settings and feature selection.
//!
//! Raw boolean switches ([`IdemixFlags`]) are resolved once into typed
//! variants ([`IdemixConfig`]) so stage kernels match on enums instead of
//! re-checking flag combinations every step.
//!
//! # Example
//!
//! ```
//! use zcore_ocean::config::{AdvectionScheme, IdemixConfig, IdemixFlags, Settings};
//!
//! let settings = Settings::default().with_time_steps(3600.0, 3600.0);
//! let flags = IdemixFlags {
//!     enable_idemix_superbee_advection: true,
//!     ..IdemixFlags::default()
//! };
//! let config = IdemixConfig::from_flags(&flags, &settings).unwrap();
//! assert_eq!(config.advection, AdvectionScheme::Superbee);
//! ```

use thiserror::Error;

/// Errors raised while validating settings or resolving flags.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Upwind and superbee advection were both switched on.
    #[error("upwind and superbee IDEMIX advection are mutually exclusive")]
    ConflictingAdvection,

    /// Surface/bottom split outside `[0, 1]`.
    #[error("eke_diss_surfbot_frac must lie in [0, 1], got {0}")]
    FractionOutOfRange(f64),

    /// Time step zero, negative or not finite.
    #[error("time step {name} must be positive, got {value}")]
    NonPositiveTimeStep { name: &'static str, value: f64 },

    /// Physical constant with an invalid value.
    #[error("parameter {name} is invalid: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Numerical constants and time steps.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Tracer (and IDEMIX) time step (s).
    pub dt_tracer: f64,
    /// Momentum time step (s).
    pub dt_mom: f64,
    /// Vertical IDEMIX time scale (s).
    pub tau_v: f64,
    /// Horizontal IDEMIX diffusion time scale (s).
    pub tau_h: f64,
    /// Vertical group velocity scaling.
    pub gamma: f64,
    /// Spectral bandwidth in vertical modes.
    pub jstar: f64,
    /// Dissipation scaling.
    pub mu0: f64,
    /// Adams-Bashforth stabilisation.
    pub ab_eps: f64,
    /// Reference density (kg/m^3).
    pub rho_0: f64,
    /// Share of redistributed EKE dissipation injected at the bottom.
    pub eke_diss_surfbot_frac: f64,
    /// Reproduce two historical quirks: east diffusion flux zeroed at a fixed
    /// interior offset and wind stress not divided by `rho_0`.
    pub legacy_compatibility: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dt_tracer: 0.0,
            dt_mom: 0.0,
            tau_v: 86400.0,
            tau_h: 1_296_000.0,
            gamma: 1.57,
            jstar: 5.0,
            mu0: 1.0 / 3.0,
            ab_eps: 0.1,
            rho_0: 1024.0,
            eke_diss_surfbot_frac: 1.0,
            legacy_compatibility: false,
        }
    }
}

impl Settings {
    /// Set tracer and momentum time steps.
    pub fn with_time_steps(mut self, dt_tracer: f64, dt_mom: f64) -> Self {
        self.dt_tracer = dt_tracer;
        self.dt_mom = dt_mom;
        self
    }

    /// Vertical IDEMIX time scale (s).
    pub fn with_tau_v(mut self, tau_v: f64) -> Self {
        self.tau_v = tau_v;
        self
    }

    /// Horizontal IDEMIX diffusion time scale (s).
    pub fn with_tau_h(mut self, tau_h: f64) -> Self {
        self.tau_h = tau_h;
        self
    }

    /// Group velocity scaling.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Modal bandwidth of the wave spectrum.
    pub fn with_jstar(mut self, jstar: f64) -> Self {
        self.jstar = jstar;
        self
    }

    /// Dissipation parameter.
    pub fn with_mu0(mut self, mu0: f64) -> Self {
        self.mu0 = mu0;
        self
    }

    /// Adams-Bashforth stabilisation.
    pub fn with_ab_eps(mut self, ab_eps: f64) -> Self {
        self.ab_eps = ab_eps;
        self
    }

    /// Reference density (kg/m^3).
    pub fn with_rho_0(mut self, rho_0: f64) -> Self {
        self.rho_0 = rho_0;
        self
    }

    /// Bottom share of redistributed EKE dissipation.
    pub fn with_eke_diss_surfbot_frac(mut self, frac: f64) -> Self {
        self.eke_diss_surfbot_frac = frac;
        self
    }

    /// Toggle the historical diffusion and wind-stress quirks.
    pub fn with_legacy_compatibility(mut self, enabled: bool) -> Self {
        self.legacy_compatibility = enabled;
        self
    }

    /// Check time steps and constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("dt_tracer", self.dt_tracer), ("dt_mom", self.dt_mom)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositiveTimeStep { name, value });
            }
        }
        for (name, value) in [
            ("jstar", self.jstar),
            ("rho_0", self.rho_0),
            ("tau_v", self.tau_v),
            ("tau_h", self.tau_h),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        for (name, value) in [
            ("gamma", self.gamma),
            ("mu0", self.mu0),
            ("ab_eps", self.ab_eps),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.eke_diss_surfbot_frac) {
            return Err(ConfigError::FractionOutOfRange(self.eke_diss_surfbot_frac));
        }
        Ok(())
    }
}

/// Raw IDEMIX switches as found in model setups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdemixFlags {
    pub enable_eke: bool,
    pub enable_store_cabbeling_heat: bool,
    pub enable_tem_friction: bool,
    pub enable_eke_diss_bottom: bool,
    pub enable_eke_diss_surfbot: bool,
    pub enable_store_bottom_friction_tke: bool,
    pub enable_idemix_hor_diffusion: bool,
    pub enable_idemix_superbee_advection: bool,
    pub enable_idemix_upwind_advection: bool,
}

/// Scheme used to advect internal-wave energy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdvectionScheme {
    #[default]
    None,
    Upwind,
    Superbee,
}

/// Where EKE dissipation is injected into the wave field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EkeInjection {
    /// Leave the dissipation at the level where it occurs.
    InPlace,
    /// Move the column integral into the bottom cell.
    Bottom,
    /// Split the column integral between bottom and surface.
    SurfaceAndBottom { bottom_fraction: f64 },
}

/// Origin of the interior internal-wave forcing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForcingSource {
    /// Dissipation of the eddy kinetic energy model.
    EddyKineticEnergy { injection: EkeInjection },
    /// Mesoscale dissipation diagnosed from the other closures.
    Diagnosed {
        cabbeling: bool,
        tem_friction: bool,
    },
}

/// Resolved IDEMIX configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdemixConfig {
    pub forcing: ForcingSource,
    /// Add bottom-friction dissipation to the wave forcing.
    pub bottom_friction: bool,
    pub hor_diffusion: bool,
    pub advection: AdvectionScheme,
}

impl Default for IdemixConfig {
    fn default() -> Self {
        Self {
            forcing: ForcingSource::Diagnosed {
                cabbeling: false,
                tem_friction: false,
            },
            bottom_friction: true,
            hor_diffusion: false,
            advection: AdvectionScheme::None,
        }
    }
}

impl IdemixConfig {
    /// Resolve raw switches.
    ///
    /// Bottom injection takes precedence over the surface/bottom split.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConflictingAdvection`] when both advection schemes are
    /// enabled, [`ConfigError::FractionOutOfRange`] for a split outside
    /// `[0, 1]` when the split is used.
    pub fn from_flags(flags: &IdemixFlags, settings: &Settings) -> Result<Self, ConfigError> {
        let advection = match (
            flags.enable_idemix_upwind_advection,
            flags.enable_idemix_superbee_advection,
        ) {
            (true, true) => return Err(ConfigError::ConflictingAdvection),
            (true, false) => AdvectionScheme::Upwind,
            (false, true) => AdvectionScheme::Superbee,
            (false, false) => AdvectionScheme::None,
        };

        let forcing = if flags.enable_eke {
            let injection = if flags.enable_eke_diss_bottom {
                EkeInjection::Bottom
            } else if flags.enable_eke_diss_surfbot {
                let frac = settings.eke_diss_surfbot_frac;
                if !(0.0..=1.0).contains(&frac) {
                    return Err(ConfigError::FractionOutOfRange(frac));
                }
                EkeInjection::SurfaceAndBottom {
                    bottom_fraction: frac,
                }
            } else {
                EkeInjection::InPlace
            };
            ForcingSource::EddyKineticEnergy { injection }
        } else {
            ForcingSource::Diagnosed {
                cabbeling: flags.enable_store_cabbeling_heat,
                tem_friction: flags.enable_tem_friction,
            }
        };

        Ok(Self {
            forcing,
            bottom_friction: !flags.enable_store_bottom_friction_tke,
            hor_diffusion: flags.enable_idemix_hor_diffusion,
            advection,
        })
    }

    /// Advection scheme for `E_iw`.
    pub fn with_advection(mut self, advection: AdvectionScheme) -> Self {
        self.advection = advection;
        self
    }

    /// Toggle horizontal diffusion of `E_iw`.
    pub fn with_hor_diffusion(mut self, enabled: bool) -> Self {
        self.hor_diffusion = enabled;
        self
    }

    /// Source of the interior energy forcing.
    pub fn with_forcing(mut self, forcing: ForcingSource) -> Self {
        self.forcing = forcing;
        self
    }

    /// Toggle the bottom-friction forcing term.
    pub fn with_bottom_friction(mut self, enabled: bool) -> Self {
        self.bottom_friction = enabled;
        self
    }
}

/// Direction of the continuity integral for `w`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContinuityDirection {
    /// Start at the bottom (w = 0 below level 0) and integrate upwards.
    #[default]
    FromBottom,
    /// Start at the surface (w = 0 at the top interface) and integrate down.
    FromSurface,
}

/// Momentum stage options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MomentumConfig {
    /// Add spherical metric terms to the Coriolis tendency.
    pub coord_degree: bool,
    pub continuity: ContinuityDirection,
}

impl MomentumConfig {
    /// Toggle the spherical metric terms.
    pub fn with_coord_degree(mut self, enabled: bool) -> Self {
        self.coord_degree = enabled;
        self
    }

    /// Direction of the continuity integral for `w`.
    pub fn with_continuity(mut self, continuity: ContinuityDirection) -> Self {
        self.continuity = continuity;
        self
    }
}
