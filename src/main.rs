//! # Moodboard CLI
//!
//! Usage:
//!   moodboard input.json                   # category placements on stdout
//!   moodboard input.json --export          # page positions on stdout
//!   moodboard input.json -o layout.json    # write to a file
//!   echo '{ ... }' | moodboard
//!   moodboard --example > moodboard.json

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use moodboard::MoodboardError;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_moodboard_json());
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), MoodboardError> {
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1])?
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    };

    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone());

    let output = if args.iter().any(|a| a == "--export") {
        moodboard::export_json(&input)?
    } else {
        moodboard::layout_json(&input)?
    };

    match output_path {
        Some(path) => {
            fs::write(&path, &output)?;
            eprintln!("✓ Written {} bytes to {}", output.len(), path);
        }
        None => println!("{}", output),
    }
    Ok(())
}

fn example_moodboard_json() -> &'static str {
    r##"{
  "config": {
    "columns": 3,
    "columnGap": 12,
    "rowGap": 12,
    "rowHeight": 160,
    "page": {
      "size": "A4",
      "margin": { "top": 36, "right": 36, "bottom": 36, "left": 36 }
    }
  },
  "items": [
    {
      "id": "oak-plank",
      "name": "Smoked Oak Plank",
      "brand": "Nordic Floors",
      "finish": "Matte oil",
      "category": "Flooring",
      "orientation": "landscape",
      "imageType": "close-up",
      "lifestyleImages": ["https://example.com/oak-living-room.jpg"]
    },
    {
      "id": "terrazzo",
      "name": "Venetian Terrazzo",
      "brand": "Pietra",
      "category": "Flooring",
      "orientation": "square",
      "imageType": "close-up"
    },
    {
      "id": "pendant",
      "name": "Globe Pendant",
      "brand": "Lumen",
      "category": "Lighting",
      "orientation": "portrait",
      "imageType": "lifestyle"
    },
    {
      "id": "wall-sconce",
      "name": "Brass Sconce",
      "brand": "Lumen",
      "finish": "Brushed brass",
      "category": "Lighting",
      "orientation": "square",
      "imageType": "close-up"
    },
    {
      "id": "linen-sofa",
      "name": "Linen Sofa",
      "brand": "Atelier",
      "category": "Seating",
      "orientation": "landscape",
      "imageType": "close-up"
    }
  ]
}
"##
}
