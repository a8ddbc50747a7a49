use crate::models::{Agent, Property};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Featured properties shown before the backend is wired up
pub fn sample_properties() -> Vec<Property> {
    vec![
        Property {
            id: "1".to_string(),
            image: "https://images.unsplash.com/photo-1600596542815-ffad4c1539a9".to_string(),
            name: "Paradise Residence".to_string(),
            location: "Ile-Ife, Osun State".to_string(),
            price: "$2,500/mo".to_string(),
            features: strings(&["3 Beds", "2 Baths", "Pool"]),
            description: Some("Luxurious residence with modern amenities and stunning views".to_string()),
            area: Some("2,500 sq ft".to_string()),
            property_type: Some("Apartment".to_string()),
            year_built: Some("2020".to_string()),
            amenities: strings(&["Pool", "Gym", "Security", "Parking", "Garden"]),
            agent: Some(Agent {
                name: "John Doe".to_string(),
                phone: "+234 801 234 5678".to_string(),
                email: "john@propertycentre.com".to_string(),
                image: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e".to_string(),
            }),
        },
        Property {
            id: "2".to_string(),
            image: "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c".to_string(),
            name: "Pelican Heights".to_string(),
            location: "Wuse, Abuja".to_string(),
            price: "$3,200/mo".to_string(),
            features: strings(&["4 Beds", "3 Baths", "Garden"]),
            description: Some("Elegant family home in a prime location".to_string()),
            area: Some("3,200 sq ft".to_string()),
            property_type: Some("House".to_string()),
            year_built: Some("2019".to_string()),
            amenities: strings(&["Garden", "Security", "Parking", "Children's Play Area"]),
            agent: Some(Agent {
                name: "Jane Smith".to_string(),
                phone: "+234 802 345 6789".to_string(),
                email: "jane@propertycentre.com".to_string(),
                image: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80".to_string(),
            }),
        },
        Property {
            id: "3".to_string(),
            image: "https://images.unsplash.com/photo-1600566753190-17f0baa2a6c3".to_string(),
            name: "Amber Suites".to_string(),
            location: "Ikeja, Lagos".to_string(),
            price: "$2,800/mo".to_string(),
            features: strings(&["2 Beds", "2 Baths", "Balcony"]),
            description: Some("Modern apartment with city views and premium finishes".to_string()),
            area: Some("1,800 sq ft".to_string()),
            property_type: Some("Apartment".to_string()),
            year_built: Some("2021".to_string()),
            amenities: strings(&["Balcony", "Security", "Parking", "Gym"]),
            agent: Some(Agent {
                name: "Sarah Johnson".to_string(),
                phone: "+234 803 456 7890".to_string(),
                email: "sarah@propertycentre.com".to_string(),
                image: "https://images.unsplash.com/photo-1494790108377-be9c29b29330".to_string(),
            }),
        },
    ]
}
