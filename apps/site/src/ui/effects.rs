use tracing::debug;

/// Effects only read viewport size and scroll position; nothing reads them back.
pub trait BackgroundEffect {
    fn name(&self) -> &'static str;
    fn start(&mut self);
    fn stop(&mut self);
    fn resize(&mut self, columns: u16, rows: u16);
    fn on_scroll(&mut self, progress: f32);
    fn tick(&mut self);
    fn is_running(&self) -> bool;
    fn frame(&self) -> Vec<String>;
}

pub const NARROW_COLUMNS: u16 = 60;
const WIDE_PARTICLES: usize = 48;
const NARROW_PARTICLES: usize = 16;
const GOLDEN_RATIO: f32 = 0.618_034;
const PARTICLE_GLYPH: char = '.';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Particle {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    columns: u16,
    rows: u16,
    scroll: f32,
    running: bool,
}

impl ParticleField {
    pub fn new(columns: u16, rows: u16) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            columns: columns.max(1),
            rows: rows.max(1),
            scroll: 0.0,
            running: false,
        };
        field.seed();
        field
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_narrow(&self) -> bool {
        self.columns < NARROW_COLUMNS
    }

    // Low-discrepancy placement, stable between runs.
    fn seed(&mut self) {
        let count = if self.is_narrow() {
            NARROW_PARTICLES
        } else {
            WIDE_PARTICLES
        };
        let (w, h) = (f32::from(self.columns), f32::from(self.rows));

        self.particles = (0..count)
            .map(|i| {
                let t = i as f32;
                let u = (t * GOLDEN_RATIO).fract();
                let v = ((t + 0.5) / count as f32).fract();
                Particle {
                    x: u * w,
                    y: v * h,
                    dx: (u - 0.5) * 0.4,
                    dy: (v - 0.5) * 0.2,
                }
            })
            .collect();
    }

    fn cell(&self, particle: &Particle) -> (usize, usize) {
        let (w, h) = (f32::from(self.columns), f32::from(self.rows));
        let y = (particle.y - self.scroll * h).rem_euclid(h);
        (
            particle.x.rem_euclid(w) as usize % usize::from(self.columns),
            y as usize % usize::from(self.rows),
        )
    }
}

impl BackgroundEffect for ParticleField {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        let columns = columns.max(1);
        let rows = rows.max(1);
        if (columns, rows) == (self.columns, self.rows) {
            return;
        }
        self.columns = columns;
        self.rows = rows;
        self.seed();
        debug!(
            particles = self.particle_count(),
            narrow = self.is_narrow(),
            "effects: particle field reseeded"
        );
    }

    fn on_scroll(&mut self, progress: f32) {
        self.scroll = (progress / 100.0).clamp(0.0, 1.0);
    }

    fn tick(&mut self) {
        if !self.running {
            return;
        }
        let (w, h) = (f32::from(self.columns), f32::from(self.rows));
        for particle in &mut self.particles {
            particle.x = (particle.x + particle.dx).rem_euclid(w);
            particle.y = (particle.y + particle.dy).rem_euclid(h);
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn frame(&self) -> Vec<String> {
        let mut grid = vec![vec![' '; usize::from(self.columns)]; usize::from(self.rows)];
        for particle in &self.particles {
            let (x, y) = self.cell(particle);
            grid[y][x] = PARTICLE_GLYPH;
        }
        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

#[derive(Default)]
pub struct EffectHost {
    effects: Vec<Box<dyn BackgroundEffect>>,
    enabled: bool,
}

impl EffectHost {
    pub fn new(enabled: bool) -> Self {
        Self {
            effects: Vec::new(),
            enabled,
        }
    }

    pub fn add(&mut self, effect: Box<dyn BackgroundEffect>) {
        self.effects.push(effect);
    }

    pub fn start_all(&mut self) {
        if !self.enabled {
            debug!("effects: disabled, not starting");
            return;
        }
        for effect in &mut self.effects {
            debug!(effect = effect.name(), "effects: start");
            effect.start();
        }
    }

    pub fn stop_all(&mut self) {
        for effect in &mut self.effects {
            effect.stop();
        }
    }

    pub fn resize_all(&mut self, columns: u16, rows: u16) {
        for effect in &mut self.effects {
            effect.resize(columns, rows);
        }
    }

    pub fn scroll_all(&mut self, progress: f32) {
        for effect in &mut self.effects {
            effect.on_scroll(progress);
        }
    }

    pub fn tick_all(&mut self) {
        for effect in &mut self.effects {
            effect.tick();
        }
    }

    pub fn frames(&self) -> Vec<String> {
        self.effects
            .iter()
            .filter(|effect| effect.is_running())
            .flat_map(|effect| effect.frame())
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/effects_tests.rs"]
mod tests;
