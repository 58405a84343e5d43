use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Deterministic noise source (splitmix64), enough to roughen the toy loop.
struct Noise(u64);

impl Noise {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [-amplitude, amplitude).
    fn jitter(&mut self, amplitude: f64) -> f64 {
        amplitude * (2.0 * self.unit() - 1.0)
    }
}

const HEADER: &str = "# ODT 1.0
# Table Start
# Title: mmArchive Data Table, synthetic sample
# Columns: Iteration {Field Updates} {Sim Time} {Time Step} {Step Size} Bx By Bz B |m_x_h| Mx/Ms My/Ms Mz/Ms {Total Energy} {Exchange Energy} {Anisotropy Energy} {Demag Energy} {Zeeman Energy} {Max Angle}
# Units: {} {} s s {} mT mT mT mT {} {} {} {} J J J J J deg
";
const FOOTER: &str = "# Table End\n";

/// Field sweep +H_MAX → -H_MAX → +H_MAX in mT.
const H_MAX: f64 = 100.0;
const STEPS: usize = 80;
/// Coercive field and switching width of the toy loop.
const H_C: f64 = 25.0;
const WIDTH: f64 = 8.0;

/// Field values of a full loop.
fn sweep() -> Vec<f64> {
    let down = (0..=STEPS).map(|i| H_MAX - 2.0 * H_MAX * i as f64 / STEPS as f64);
    let up = (1..=STEPS).map(|i| -H_MAX + 2.0 * H_MAX * i as f64 / STEPS as f64);
    down.chain(up).collect()
}

/// Write one table. `along_y` applies the field along y instead of at `angle`.
fn write_table(path: &Path, angle: f64, along_y: bool, rng: &mut Noise) -> std::io::Result<()> {
    let theta = angle.to_radians();
    let (dir_x, dir_y) = if along_y { (0.0, 1.0) } else { (-theta.cos(), -theta.sin()) };

    let field = sweep();
    let mut out = String::from(HEADER);
    let mut prev_h = f64::INFINITY;
    let mut sim_time = 0.0;

    for (i, &h) in field.iter().enumerate() {
        // descending branch switches at -H_C, ascending at +H_C
        let shift = if h <= prev_h { H_C } else { -H_C };
        prev_h = h;

        let m_par = ((h + shift) / WIDTH).tanh();
        let m_perp = (1.0 - m_par * m_par).max(0.0).sqrt() * 0.3 + rng.jitter(0.01);
        let mx = m_par * dir_x - m_perp * dir_y;
        let my = m_par * dir_y + m_perp * dir_x;
        let mz = rng.jitter(0.004);

        let bx = h * dir_x;
        let by = h * dir_y;
        let b = (bx * bx + by * by).sqrt();

        let step = 1e-13;
        sim_time += step * 40.0;
        let zeeman = -b * 1e-3 * m_par * 1e-18;

        let _ = writeln!(
            out,
            "{:>6} {:>6} {:.6e} {:.6e} {:.6e} {:.6} {:.6} 0 {:.6} {:.6e} {:.9} {:.9} {:.9} {:.6e} {:.6e} {:.6e} {:.6e} {:.6e} {:.4}",
            i * 40,
            i * 41,
            sim_time,
            step,
            step * 1e12,
            bx,
            by,
            b,
            rng.unit() * 1e-5,
            mx,
            my,
            mz,
            zeeman + 2.1e-18,
            1.3e-18,
            0.2e-18,
            0.6e-18,
            zeeman,
            rng.unit() * 5.0,
        );
    }
    out.push_str(FOOTER);
    fs::write(path, out)
}

fn main() -> std::io::Result<()> {
    let mut rng = Noise(42);
    let out_dir = Path::new("sample_data");
    fs::create_dir_all(out_dir)?;

    let tables: [(&str, f64, bool); 6] = [
        ("film_0_deg.odt", 0.0, false),
        ("film_30_deg.odt", 30.0, false),
        ("film_45_Grad.odt", 45.0, false),
        ("film_135_deg.odt", 135.0, false),
        // cos 90° = 0: export fails on purpose
        ("film_90_deg.odt", 90.0, false),
        ("film_y_sweep.odt", 0.0, true),
    ];

    for (name, angle, along_y) in tables {
        let path = out_dir.join(name);
        write_table(&path, angle, along_y, &mut rng)?;
        println!("Wrote {} ({} rows)", path.display(), 2 * STEPS + 1);
    }
    Ok(())
}
