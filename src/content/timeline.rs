use crate::domain::model::{ImageDescriptor, TimelineEntry, TimelineImage, VideoDescriptor};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

macro_rules! bucket {
    ($file:literal) => {
        concat!(
            "https://storage.googleapis.com/wedding-website-2025-regdev-1752188684/",
            $file
        )
    };
}

/// 2012-01-01T00:00:00Z，故事的起點
pub const PROGRESS_START_SECS: i64 = 1_325_376_000;
/// 2025-08-08T00:00:00Z，婚禮當天
pub const PROGRESS_END_SECS: i64 = 1_754_611_200;

pub static TIMELINE: &[TimelineEntry] = &[
    TimelineEntry {
        id: 1,
        year: 2012,
        month: "Summer",
        title: "Early Adventures",
        description: "Our first adventures together - exploring the city and making memories with friends.",
        images: &[
            ImageDescriptor {
                src: bucket!("earlydays_group_fun1.jpg"),
                alt: "Party on the Boat",
                title: "Party on the Boat",
                description: "Unforgettable fun and laughter with friends on the water",
            },
            ImageDescriptor {
                src: bucket!("earlydays_group_fun2.jpg"),
                alt: "Laughs with Friends",
                title: "Laughs with Friends",
                description: "Cherished moments and big smiles from our early days together",
            },
            ImageDescriptor {
                src: bucket!("earlydays_lakeigha_pose.jpg"),
                alt: "Lakeigha in the City",
                title: "Lakeigha in the City",
                description: "Lakeigha striking a pose in the city during our early adventures",
            },
        ],
        video: None,
        icon: "🌅",
        color: "from-blue-400 to-purple-500",
    },
    TimelineEntry {
        id: 2,
        year: 2023,
        month: "Spring",
        title: "Growing Together",
        description: "Building our life together, embracing new adventures and creating our own traditions.",
        images: &[
            ImageDescriptor {
                src: "./images/jeep_life_red.jpg",
                alt: "Jeep Adventures",
                title: "Jeep Adventures",
                description: "Our love for adventure and the open road",
            },
            ImageDescriptor {
                src: "./images/vacation_swimsuit.jpg",
                alt: "Vacation Vibes",
                title: "Vacation Vibes",
                description: "Relaxing together in paradise",
            },
        ],
        video: None,
        icon: "🌱",
        color: "from-green-400 to-blue-500",
    },
    TimelineEntry {
        id: 3,
        year: 2024,
        month: "Summer",
        title: "The Proposal",
        description: "The moment that changed everything - when we decided to spend forever together. A magical vacation that became the beginning of forever.",
        images: &[ImageDescriptor {
            src: bucket!("proposal-vacay.png"),
            alt: "Proposal Vacation",
            title: "Another Proposal Moment",
            description: "One of the many moments Marcus asked Lakeigha to spend forever together.",
        }],
        video: Some(VideoDescriptor {
            src: "./videos/proposal.mp4",
            title: "The Proposal Video",
            description: "Watch the magical moment when Marcus asked Lakeigha to spend forever together",
            duration: "2:34",
            featured: true,
        }),
        icon: "💍",
        color: "from-pink-400 to-red-500",
    },
    TimelineEntry {
        id: 4,
        year: 2024,
        month: "Fall",
        title: "Professional Memories",
        description: "Capturing our love story through the lens of a professional photographer.",
        images: &[ImageDescriptor {
            src: "./images/proshot.jpg",
            alt: "Professional Love",
            title: "Professional Love",
            description: "Our official engagement photos",
        }],
        video: None,
        icon: "📸",
        color: "from-purple-400 to-pink-500",
    },
    TimelineEntry {
        id: 5,
        year: 2024,
        month: "Fall",
        title: "Making It Official",
        description: "Taking the next step in our journey together.",
        images: &[ImageDescriptor {
            src: "./images/marriage-license.jpg",
            alt: "The Big Step",
            title: "The Big Step",
            description: "Making it official - our marriage license",
        }],
        video: None,
        icon: "📜",
        color: "from-yellow-400 to-orange-500",
    },
    TimelineEntry {
        id: 6,
        year: 2025,
        month: "Present",
        title: "Celebrating Love",
        description: "Embracing our Texas roots and celebrating our love story.",
        images: &[
            ImageDescriptor {
                src: "./images/champ-keke-red-black.jpg",
                alt: "Champagne Celebration",
                title: "Champagne Celebration",
                description: "Celebrating our love with style and elegance",
            },
            ImageDescriptor {
                src: "./images/cowboy_beige_white.jpg",
                alt: "Cowboy Style",
                title: "Cowboy Style",
                description: "Embracing our Texas roots",
            },
        ],
        video: None,
        icon: "🤠",
        color: "from-red-400 to-pink-500",
    },
];

pub fn all() -> &'static [TimelineEntry] {
    TIMELINE
}

pub fn by_id(id: u32) -> Option<&'static TimelineEntry> {
    TIMELINE.iter().find(|entry| entry.id == id)
}

/// 所有項目的圖片攤平成一個序列，保留原本順序
pub fn all_images() -> Vec<TimelineImage<'static>> {
    flatten_images(TIMELINE)
}

pub fn flatten_images(entries: &[TimelineEntry]) -> Vec<TimelineImage<'_>> {
    entries
        .iter()
        .flat_map(|entry| {
            entry.images.iter().map(move |image| TimelineImage {
                image,
                timeline_item: entry,
            })
        })
        .collect()
}

pub fn format_date(year: i32, month: &str) -> String {
    format!("{} {}", month, year)
}

/// 回傳 now 在起點與婚禮日之間的線性位置，限制在 [0, 1]
pub fn progress_at(now: DateTime<Utc>) -> f64 {
    let start = PROGRESS_START_SECS * 1000;
    let total = (PROGRESS_END_SECS - PROGRESS_START_SECS) * 1000;
    let elapsed = now.timestamp_millis() - start;
    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}

pub fn current_progress() -> f64 {
    progress_at(Utc::now())
}

/// 回傳重複出現的 id；空代表 id 唯一
pub fn duplicate_ids(entries: &[TimelineEntry]) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for entry in entries {
        if !seen.insert(entry.id) && !duplicates.contains(&entry.id) {
            duplicates.push(entry.id);
        }
    }
    duplicates
}
